use crate::error::ClipboardError;

/// Write-only access to the system clipboard
pub trait TextClipboard: Send {
    /// Place plain text on the clipboard under `label`
    fn set_text(&mut self, label: &str, text: &str) -> Result<(), ClipboardError>;
}
