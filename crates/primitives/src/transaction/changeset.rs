use super::types::{Bias, Change, Insertion, Operation, Tendril};
use crate::Rope;
use crate::range::{CharIdx, CharLen};

/// A whole-document edit expressed as retain/delete/insert operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
	ops: Vec<Operation>,
	/// Length of the source document.
	len: CharLen,
	/// Length of the document once applied.
	len_after: CharLen,
}

impl ChangeSet {
	/// Builds a changeset from sorted, non-overlapping changes against a
	/// document of `doc_len` chars.
	///
	/// Changes that start before the end of the previous one are clamped
	/// forward so the result stays well formed.
	pub fn from_changes(doc_len: CharLen, changes: impl IntoIterator<Item = Change>) -> Self {
		let mut cs = Self::default();
		let mut last = 0;

		for change in changes {
			let start = change.start.clamp(last, doc_len);
			let end = change.end.clamp(start, doc_len);

			cs.retain(start - last);
			if let Some(text) = change.replacement {
				cs.insert(text);
			}
			cs.delete(end - start);
			last = end;
		}

		cs.retain(doc_len - last);
		cs
	}

	/// Builds a changeset replacing `[start, end)` with `text`.
	pub fn replace(doc_len: CharLen, start: CharIdx, end: CharIdx, text: &str) -> Self {
		let replacement = (!text.is_empty()).then(|| text.to_string());
		Self::from_changes(doc_len, [Change { start, end, replacement }])
	}

	/// Length of the source document.
	pub fn len(&self) -> CharLen {
		self.len
	}

	/// Length of the document after applying.
	pub fn len_after(&self) -> CharLen {
		self.len_after
	}

	/// Returns true if applying this changeset leaves the document untouched.
	pub fn is_identity(&self) -> bool {
		self.ops.iter().all(|op| matches!(op, Operation::Retain(_)))
	}

	/// The operation list.
	pub fn operations(&self) -> &[Operation] {
		&self.ops
	}

	fn retain(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}
		self.len += n;
		self.len_after += n;
		match self.ops.last_mut() {
			Some(Operation::Retain(count)) => *count += n,
			_ => self.ops.push(Operation::Retain(n)),
		}
	}

	fn delete(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}
		self.len += n;
		match self.ops.last_mut() {
			Some(Operation::Delete(count)) => *count += n,
			_ => self.ops.push(Operation::Delete(n)),
		}
	}

	/// Inserts keep their place ahead of a trailing delete so that
	/// `insert, delete` and `delete, insert` normalize to one form.
	fn insert(&mut self, text: Tendril) {
		if text.is_empty() {
			return;
		}
		let ins = Insertion::new(text);
		self.len_after += ins.char_len();

		match self.ops.as_mut_slice() {
			[.., Operation::Insert(prev)] | [.., Operation::Insert(prev), Operation::Delete(_)] => prev.append(ins),
			[.., last @ Operation::Delete(_)] => {
				let del = std::mem::replace(last, Operation::Insert(ins));
				self.ops.push(del);
			}
			_ => self.ops.push(Operation::Insert(ins)),
		}
	}

	/// Applies the changeset to `doc` in place.
	pub fn apply(&self, doc: &mut Rope) {
		let mut pos = 0;
		for op in &self.ops {
			match op {
				Operation::Retain(n) => pos += n,
				Operation::Delete(n) => doc.remove(pos..pos + n),
				Operation::Insert(ins) => {
					doc.insert(pos, ins.text());
					pos += ins.char_len();
				}
			}
		}
	}

	/// Returns the changeset that undoes this one.
	///
	/// `doc` must be the document as it was before this changeset applied.
	pub fn invert(&self, doc: &Rope) -> ChangeSet {
		let mut inverse = ChangeSet::default();
		let mut pos = 0;
		for op in &self.ops {
			match op {
				Operation::Retain(n) => {
					inverse.retain(*n);
					pos += n;
				}
				Operation::Delete(n) => {
					inverse.insert(doc.slice(pos..pos + n).to_string());
					pos += n;
				}
				Operation::Insert(ins) => inverse.delete(ins.char_len()),
			}
		}
		inverse
	}

	/// Maps a char offset in the source document to the applied document.
	///
	/// Offsets inside deleted text collapse onto the deletion point.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let mut old_pos = 0;
		let mut new_pos = 0;

		for op in &self.ops {
			if old_pos > pos {
				break;
			}
			match op {
				Operation::Retain(n) => {
					if old_pos + n > pos {
						return new_pos + (pos - old_pos);
					}
					old_pos += n;
					new_pos += n;
				}
				Operation::Delete(n) => {
					if old_pos + n > pos {
						return new_pos;
					}
					old_pos += n;
				}
				Operation::Insert(ins) => {
					if !(old_pos == pos && bias == Bias::Left) {
						new_pos += ins.char_len();
					}
				}
			}
		}

		new_pos + pos.saturating_sub(old_pos)
	}
}
