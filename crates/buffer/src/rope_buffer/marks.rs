use rustc_hash::FxHashMap;
use tessel_primitives::range::CharIdx;
use tessel_primitives::{Bias, BookmarkId, ChangeSet, MarkId, MarkOptions, Position, Range};

use crate::Mark;

/// A mark in char offsets.
#[derive(Debug, Clone)]
pub(super) struct MarkEntry {
	pub id: MarkId,
	pub from: CharIdx,
	pub to: CharIdx,
	pub options: MarkOptions,
}

impl MarkEntry {
	pub fn to_mark(&self, to_pos: impl Fn(CharIdx) -> Position) -> Mark {
		Mark {
			id: self.id,
			range: Range::new(to_pos(self.from), to_pos(self.to)),
			options: self.options.clone(),
		}
	}
}

/// Bookmarks and marks, tracked in char offsets.
#[derive(Debug, Default)]
pub(super) struct Decorations {
	next_id: u64,
	bookmarks: FxHashMap<BookmarkId, CharIdx>,
	marks: Vec<MarkEntry>,
}

impl Decorations {
	fn next_id(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	pub fn add_bookmark(&mut self, at: CharIdx) -> BookmarkId {
		let id = BookmarkId(self.next_id());
		self.bookmarks.insert(id, at);
		id
	}

	pub fn bookmark(&self, id: BookmarkId) -> Option<CharIdx> {
		self.bookmarks.get(&id).copied()
	}

	pub fn remove_bookmark(&mut self, id: BookmarkId) -> bool {
		self.bookmarks.remove(&id).is_some()
	}

	pub fn add_mark(&mut self, from: CharIdx, to: CharIdx, options: MarkOptions) -> MarkId {
		let id = MarkId(self.next_id());
		let at = self.marks.partition_point(|m| (m.from, m.to) <= (from, to));
		self.marks.insert(at, MarkEntry { id, from, to, options });
		id
	}

	pub fn remove_mark(&mut self, id: MarkId) -> bool {
		let before = self.marks.len();
		self.marks.retain(|m| m.id != id);
		self.marks.len() != before
	}

	/// Marks in document order.
	pub fn marks(&self) -> impl Iterator<Item = &MarkEntry> {
		self.marks.iter()
	}

	/// Carries every decoration across `changes`.
	///
	/// Bookmarks stay before text inserted on them. Marks do not grow at
	/// either edge and are dropped once their text is gone.
	pub fn map_through(&mut self, changes: &ChangeSet) {
		for at in self.bookmarks.values_mut() {
			*at = changes.map_pos(*at, Bias::Left);
		}
		self.marks.retain_mut(|m| {
			let was_empty = m.from == m.to;
			m.from = changes.map_pos(m.from, Bias::Right);
			m.to = changes.map_pos(m.to, Bias::Left).max(m.from);
			was_empty || m.from < m.to
		});
		self.marks.sort_by_key(|m| (m.from, m.to));
	}
}
