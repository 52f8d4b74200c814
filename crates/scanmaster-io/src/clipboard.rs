use arboard::Clipboard;
use scanmaster_core::clipboard::TextClipboard;
use scanmaster_core::error::ClipboardError;

/// System clipboard. A handle is opened per write so nothing is held between copies
#[derive(Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl TextClipboard for SystemClipboard {
    fn set_text(&mut self, label: &str, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;

        tracing::info!("Copied {} chars to clipboard as '{}'", text.len(), label);
        Ok(())
    }
}
