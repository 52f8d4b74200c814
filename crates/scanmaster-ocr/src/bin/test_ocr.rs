//! Run the OCR engine on one image file: cargo run -p scanmaster-ocr --bin test_ocr -- <image> [lang]

use std::sync::Arc;

use anyhow::{Context, Result};
use scanmaster_config::Config;
use scanmaster_core::recognition::{Orientation, Recognizer};
use scanmaster_ocr::TesseractEngine;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().context("usage: test_ocr <image> [lang]")?;

    let config = Config::new();
    let language = args
        .next()
        .unwrap_or_else(|| config.recognition.language.clone());
    let engine = TesseractEngine::new(&config.recognition.engine_path, language);

    let version = engine.probe().await?;
    tracing::info!("Engine: {}", version);

    let start = std::time::Instant::now();
    let image = image::open(&path).with_context(|| format!("Failed to open {path}"))?;
    tracing::info!("Loaded {}x{} in {:?}", image.width(), image.height(), start.elapsed());

    let orientation = Orientation::from_degrees(config.recognition.orientation).unwrap_or_default();

    let start = std::time::Instant::now();
    let text = engine.recognize(Arc::new(image), orientation).await?;
    tracing::info!(
        "Recognized {} chars ({}) in {:?}",
        text.len(),
        engine.language(),
        start.elapsed()
    );

    println!("{text}");
    Ok(())
}
