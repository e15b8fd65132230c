//! The text buffer contract consumed by the block engine, and a rope-backed
//! implementation of it.
//!
//! The buffer is the single source of truth for document text. Everything the
//! engine shows is derived from it, and every edit the engine makes goes
//! through [`TextBuffer::replace`], usually bracketed by an operation so the
//! change notification fires once.

mod rope_buffer;

pub use rope_buffer::{COMMANDS, RopeBuffer};
use tessel_primitives::{BookmarkId, MarkId, MarkOptions, Position, Range};

/// A decorated buffer range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
	pub id: MarkId,
	pub range: Range,
	pub options: MarkOptions,
}

/// What produced a buffer change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
	/// A replace, or an operation of replaces.
	Edit,
	Undo,
	Redo,
}

/// One change notification.
///
/// Emitted once per outermost operation, however many replaces it contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferChange {
	/// Buffer version after the change.
	pub version: u64,
	pub origin: ChangeOrigin,
	/// Number of individual replaces folded into this change.
	pub edits: usize,
}

/// Range-addressed text storage with bookmarks, marks, atomic operations,
/// and change notifications.
pub trait TextBuffer {
	/// Full document text.
	fn text(&self) -> String;

	/// Text covered by `range`.
	fn slice(&self, range: Range) -> String;

	/// Number of lines, counting the empty line after a trailing newline.
	fn line_count(&self) -> usize;

	/// Position just past the last character.
	fn end(&self) -> Position;

	/// Clamps `pos` onto an existing line and column.
	fn clip_pos(&self, pos: Position) -> Position;

	/// Replaces `range` with `text`.
	///
	/// Positions after the range shift by the length difference; callers
	/// issuing several replaces must order them accordingly.
	fn replace(&mut self, range: Range, text: &str);

	fn cursor(&self) -> Position;

	fn set_cursor(&mut self, pos: Position);

	/// Scrolls the view so `pos` is visible.
	fn scroll_into_view(&mut self, pos: Position);

	/// Places a bookmark at `pos`. Text inserted exactly at a bookmark ends up
	/// after it.
	fn set_bookmark(&mut self, pos: Position) -> BookmarkId;

	/// Current position of a bookmark, or `None` once cleared.
	fn resolve_bookmark(&self, id: BookmarkId) -> Option<Position>;

	/// Removes a bookmark. Returns false if it did not exist.
	fn clear_bookmark(&mut self, id: BookmarkId) -> bool;

	/// Decorates `range`. Marks follow edits and disappear when their range
	/// is deleted.
	fn mark_text(&mut self, range: Range, options: MarkOptions) -> MarkId;

	/// Marks touching `range`.
	fn find_marks(&self, range: Range) -> Vec<Mark>;

	/// Marks touching `pos`.
	fn find_marks_at(&self, pos: Position) -> Vec<Mark>;

	/// Every live mark, in document order.
	fn all_marks(&self) -> Vec<Mark>;

	/// Removes a mark. Returns false if it did not exist.
	fn clear_mark(&mut self, id: MarkId) -> bool;

	/// Opens an operation. Operations nest; replaces inside the outermost one
	/// become a single change notification and a single undo step.
	fn begin_operation(&mut self);

	/// Closes the innermost operation.
	fn end_operation(&mut self);

	/// Drains pending change notifications.
	fn take_changes(&mut self) -> Vec<BufferChange>;

	/// Monotonic counter bumped by every change notification.
	fn version(&self) -> u64;

	/// Runs a named editing command. Returns false for unknown names.
	fn exec_command(&mut self, name: &str) -> bool;

	/// Reverts the last change. Returns false when there is nothing to undo.
	fn undo(&mut self) -> bool;

	/// Reapplies the last undone change.
	fn redo(&mut self) -> bool;

	/// Swaps the outer container's mode class.
	fn set_mode_class(&mut self, class: &str);

	fn mode_class(&self) -> &str;
}

/// Runs `f` inside one buffer operation.
pub fn transact<B, R>(buffer: &mut B, f: impl FnOnce(&mut B) -> R) -> R
where
	B: TextBuffer + ?Sized,
{
	buffer.begin_operation();
	let result = f(buffer);
	buffer.end_operation();
	result
}
