pub mod camera;
pub mod clipboard;
pub mod image_source;

pub use camera::{Camera, CommandCamera};
pub use clipboard::SystemClipboard;
pub use image_source::{ImageSource, decode_image};
