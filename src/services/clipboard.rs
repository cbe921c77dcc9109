use thiserror::Error;

/// Errors that can occur while writing to the clipboard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Destination for copied passwords.
///
/// The GUI implements this by selecting the read-only password field and
/// copying its contents through the windowing system's clipboard.
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardSink {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
