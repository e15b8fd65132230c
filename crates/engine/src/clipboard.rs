//! The native copy mechanism behind copy and cut.

use thiserror::Error;

/// A native clipboard write failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Receives text copied out of the buffer.
pub trait Clipboard {
	fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Keeps the last copied text in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
	contents: Option<String>,
}

impl MemoryClipboard {
	pub fn contents(&self) -> Option<&str> {
		self.contents.as_deref()
	}
}

impl Clipboard for MemoryClipboard {
	fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
		self.contents = Some(text.to_string());
		Ok(())
	}
}

/// A clipboard that always fails, for hosts without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
	fn copy(&mut self, _text: &str) -> Result<(), ClipboardError> {
		Err(ClipboardError("no native clipboard".to_string()))
	}
}
