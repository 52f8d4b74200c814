mod ocr;

pub use ocr::{TesseractEngine, encode_png};
