use crate::range::{CharIdx, CharLen};

/// Owned text carried by an insertion.
pub type Tendril = String;

/// Replacement of the char range `[start, end)`.
///
/// A `None` replacement is a pure deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
	/// The starting character index of the change.
	pub start: CharIdx,
	/// The ending character index of the change (exclusive).
	pub end: CharIdx,
	/// The replacement text, or [`None`] for deletion.
	pub replacement: Option<Tendril>,
}

/// How a position sitting exactly on an insertion point is mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// Stay before text inserted at the position.
	Left,
	/// Move after text inserted at the position.
	Right,
}

/// Inserted text with its char length cached.
///
/// Fields are private so `char_len` always equals `text.chars().count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
	text: Tendril,
	char_len: CharLen,
}

impl Insertion {
	/// Creates an insertion, counting chars once.
	#[inline]
	pub fn new(text: Tendril) -> Self {
		let char_len = text.chars().count();
		Self { text, char_len }
	}

	/// The inserted text.
	#[inline]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Length of the inserted text in chars.
	#[inline]
	pub fn char_len(&self) -> CharLen {
		self.char_len
	}

	pub(super) fn append(&mut self, other: Insertion) {
		self.text.push_str(&other.text);
		self.char_len += other.char_len;
	}
}

/// One step of a changeset walk over the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Keep the next N source characters.
	Retain(CharLen),
	/// Drop the next N source characters.
	Delete(CharLen),
	/// Emit new text at the current position.
	Insert(Insertion),
}
