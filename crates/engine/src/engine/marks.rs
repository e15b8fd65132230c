//! Decorations created through the engine.
//!
//! Queries only return marks this engine created; marks other code placed
//! on the same buffer are filtered out.

use tessel_buffer::{Mark, TextBuffer};
use tessel_primitives::{MarkId, MarkOptions, Position, Range};
use tessel_syntax::Parser;
use tracing::trace;

use super::Engine;
use crate::error::Result;
use crate::render::Renderer;

impl<B: TextBuffer, P: Parser, R: Renderer> Engine<B, P, R> {
	pub fn mark_text(&mut self, range: Range, options: MarkOptions) -> MarkId {
		let id = self.buffer.mark_text(range, options);
		self.own_marks.insert(id);
		trace!(mark = %id, %range, "marked");
		id
	}

	/// Marks `range` with loosely typed options. Any key other than `css`,
	/// `className` or `title` is an error and nothing is marked.
	pub fn mark_text_with<K, V>(&mut self, range: Range, options: impl IntoIterator<Item = (K, V)>) -> Result<MarkId>
	where
		K: AsRef<str>,
		V: Into<String>,
	{
		let options = MarkOptions::from_pairs(options)?;
		Ok(self.mark_text(range, options))
	}

	pub fn find_marks(&self, range: Range) -> Vec<Mark> {
		self.own(self.buffer.find_marks(range))
	}

	pub fn find_marks_at(&self, pos: Position) -> Vec<Mark> {
		self.own(self.buffer.find_marks_at(pos))
	}

	pub fn all_marks(&self) -> Vec<Mark> {
		self.own(self.buffer.all_marks())
	}

	/// Removes a mark this engine created. Returns false for any other id.
	pub fn clear_mark(&mut self, id: MarkId) -> bool {
		self.own_marks.remove(&id) && self.buffer.clear_mark(id)
	}

	fn own(&self, marks: Vec<Mark>) -> Vec<Mark> {
		marks.into_iter().filter(|m| self.own_marks.contains(&m.id)).collect()
	}
}
