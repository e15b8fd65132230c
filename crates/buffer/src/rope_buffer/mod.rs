//! [`TextBuffer`] over a [`Rope`].

mod commands;
mod history;
mod marks;


pub use commands::COMMANDS;
use history::{Edit, History};
use marks::Decorations;
use tessel_primitives::range::CharIdx;
use tessel_primitives::{
	Bias, BookmarkId, ChangeSet, MarkId, MarkOptions, Position, Range, Rope, is_line_break,
};
use tracing::trace;

use crate::{BufferChange, ChangeOrigin, Mark, TextBuffer};

/// Replaces grouped by an open operation.
#[derive(Debug, Default)]
struct PendingOperation {
	depth: usize,
	edits: Vec<Edit>,
}

/// A rope-backed text buffer.
#[derive(Debug, Default)]
pub struct RopeBuffer {
	doc: Rope,
	cursor: CharIdx,
	scrolled_to: Option<Position>,
	decorations: Decorations,
	history: History,
	pending: Option<PendingOperation>,
	changes: Vec<BufferChange>,
	version: u64,
	mode_class: String,
}

impl RopeBuffer {
	/// Creates a buffer holding `text` with the cursor at the start.
	pub fn new(text: &str) -> Self {
		Self {
			doc: Rope::from_str(text),
			..Self::default()
		}
	}

	/// The underlying rope.
	pub fn rope(&self) -> &Rope {
		&self.doc
	}

	/// Last position passed to [`TextBuffer::scroll_into_view`].
	pub fn scrolled_to(&self) -> Option<Position> {
		self.scrolled_to
	}

	/// Returns true while an operation is open.
	pub fn in_operation(&self) -> bool {
		self.pending.is_some()
	}

	/// Number of chars on `line`, excluding its line break.
	fn line_len(&self, line: usize) -> usize {
		let slice = self.doc.line(line);
		let mut len = slice.len_chars();
		while len > 0 && is_line_break(slice.char(len - 1)) {
			len -= 1;
		}
		len
	}

	/// Converts a position to a char offset, clamping out-of-range lines and
	/// columns onto the document.
	pub fn pos_to_char(&self, pos: Position) -> CharIdx {
		let pos = self.clip_pos(pos);
		self.doc.line_to_char(pos.line) + pos.column
	}

	/// Converts a char offset to a position.
	pub fn char_to_pos(&self, idx: CharIdx) -> Position {
		let idx = idx.min(self.doc.len_chars());
		let line = self.doc.char_to_line(idx);
		Position::new(line, idx - self.doc.line_to_char(line))
	}

	/// Applies `changes` to the document and carries cursor, bookmarks, and
	/// marks across it. Returns the inverse.
	fn apply_changes(&mut self, changes: &ChangeSet) -> ChangeSet {
		let inverse = changes.invert(&self.doc);
		changes.apply(&mut self.doc);
		self.cursor = changes.map_pos(self.cursor, Bias::Right);
		self.decorations.map_through(changes);
		inverse
	}

	fn notify(&mut self, origin: ChangeOrigin, edits: usize) {
		self.version += 1;
		trace!(version = self.version, ?origin, edits, "buffer changed");
		self.changes.push(BufferChange {
			version: self.version,
			origin,
			edits,
		});
	}

	fn commit(&mut self, edits: Vec<Edit>) {
		if edits.is_empty() {
			return;
		}
		let count = edits.len();
		self.history.record(edits);
		self.notify(ChangeOrigin::Edit, count);
	}

	/// Inserts `text` at the cursor as one edit.
	pub(crate) fn insert_at_cursor(&mut self, text: &str) {
		let at = self.cursor();
		self.replace(Range::point(at), text);
	}
}

impl TextBuffer for RopeBuffer {
	fn text(&self) -> String {
		self.doc.to_string()
	}

	fn slice(&self, range: Range) -> String {
		let from = self.pos_to_char(range.from);
		let to = self.pos_to_char(range.to).max(from);
		self.doc.slice(from..to).to_string()
	}

	fn line_count(&self) -> usize {
		self.doc.len_lines()
	}

	fn end(&self) -> Position {
		self.char_to_pos(self.doc.len_chars())
	}

	fn clip_pos(&self, pos: Position) -> Position {
		let last_line = self.doc.len_lines().saturating_sub(1);
		if pos.line > last_line {
			return Position::new(last_line, self.line_len(last_line));
		}
		Position::new(pos.line, pos.column.min(self.line_len(pos.line)))
	}

	fn replace(&mut self, range: Range, text: &str) {
		let from = self.pos_to_char(range.from);
		let to = self.pos_to_char(range.to).max(from);
		let changes = ChangeSet::replace(self.doc.len_chars(), from, to, text);
		if changes.is_identity() {
			return;
		}

		let inverse = self.apply_changes(&changes);
		let edit = Edit {
			forward: changes,
			inverse,
		};
		match self.pending.as_mut() {
			Some(op) => op.edits.push(edit),
			None => self.commit(vec![edit]),
		}
	}

	fn cursor(&self) -> Position {
		self.char_to_pos(self.cursor)
	}

	fn set_cursor(&mut self, pos: Position) {
		self.cursor = self.pos_to_char(pos);
	}

	fn scroll_into_view(&mut self, pos: Position) {
		self.scrolled_to = Some(self.clip_pos(pos));
	}

	fn set_bookmark(&mut self, pos: Position) -> BookmarkId {
		let at = self.pos_to_char(pos);
		self.decorations.add_bookmark(at)
	}

	fn resolve_bookmark(&self, id: BookmarkId) -> Option<Position> {
		self.decorations.bookmark(id).map(|at| self.char_to_pos(at))
	}

	fn clear_bookmark(&mut self, id: BookmarkId) -> bool {
		self.decorations.remove_bookmark(id)
	}

	fn mark_text(&mut self, range: Range, options: MarkOptions) -> MarkId {
		let from = self.pos_to_char(range.from);
		let to = self.pos_to_char(range.to).max(from);
		self.decorations.add_mark(from, to, options)
	}

	fn find_marks(&self, range: Range) -> Vec<Mark> {
		let from = self.pos_to_char(range.from);
		let to = self.pos_to_char(range.to);
		self.decorations
			.marks()
			.filter(|m| m.from <= to && m.to >= from)
			.map(|m| m.to_mark(|idx| self.char_to_pos(idx)))
			.collect()
	}

	fn find_marks_at(&self, pos: Position) -> Vec<Mark> {
		self.find_marks(Range::point(pos))
	}

	fn all_marks(&self) -> Vec<Mark> {
		self.decorations.marks().map(|m| m.to_mark(|idx| self.char_to_pos(idx))).collect()
	}

	fn clear_mark(&mut self, id: MarkId) -> bool {
		self.decorations.remove_mark(id)
	}

	fn begin_operation(&mut self) {
		self.pending.get_or_insert_with(PendingOperation::default).depth += 1;
	}

	fn end_operation(&mut self) {
		let Some(op) = self.pending.as_mut() else {
			tracing::warn!("end_operation without a matching begin_operation");
			return;
		};
		op.depth -= 1;
		if op.depth == 0 {
			let edits = self.pending.take().map(|op| op.edits).unwrap_or_default();
			self.commit(edits);
		}
	}

	fn take_changes(&mut self) -> Vec<BufferChange> {
		std::mem::take(&mut self.changes)
	}

	fn version(&self) -> u64 {
		self.version
	}

	fn exec_command(&mut self, name: &str) -> bool {
		commands::run(self, name)
	}

	fn undo(&mut self) -> bool {
		let Some(edits) = self.history.pop_undo() else {
			return false;
		};
		for edit in edits.iter().rev() {
			self.apply_changes(&edit.inverse);
		}
		let count = edits.len();
		self.history.push_redo(edits);
		self.notify(ChangeOrigin::Undo, count);
		true
	}

	fn redo(&mut self) -> bool {
		let Some(edits) = self.history.pop_redo() else {
			return false;
		};
		for edit in &edits {
			self.apply_changes(&edit.forward);
		}
		let count = edits.len();
		self.history.push_undo(edits);
		self.notify(ChangeOrigin::Redo, count);
		true
	}

	fn set_mode_class(&mut self, class: &str) {
		self.mode_class.clear();
		self.mode_class.push_str(class);
	}

	fn mode_class(&self) -> &str {
		&self.mode_class
	}
}
