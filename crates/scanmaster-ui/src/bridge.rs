use std::io::BufRead;

use kanal::AsyncReceiver;

/// Bridge between blocking stdin and the async UI loop
///
/// Lines are read on a plain thread rather than the runtime's blocking pool so
/// a pending read never holds up shutdown.
pub fn spawn_stdin_reader(capacity: usize) -> std::io::Result<AsyncReceiver<String>> {
    let (tx, rx) = kanal::bounded(capacity);

    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("[UI] stdin read failed: {}", e);
                        break;
                    }
                }
            }
            tracing::debug!("[UI] stdin closed");
        })?;

    Ok(rx.to_async())
}
