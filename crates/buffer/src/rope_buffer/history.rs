use tessel_primitives::ChangeSet;

/// One applied replace and the changeset that reverts it.
#[derive(Debug, Clone)]
pub(super) struct Edit {
	pub forward: ChangeSet,
	pub inverse: ChangeSet,
}

/// Undo and redo stacks of edit groups.
///
/// A group is every edit of one operation, in the order it was applied.
#[derive(Debug, Default)]
pub(super) struct History {
	undo: Vec<Vec<Edit>>,
	redo: Vec<Vec<Edit>>,
}

impl History {
	/// Records a fresh group. New edits invalidate the redo stack.
	pub fn record(&mut self, group: Vec<Edit>) {
		self.undo.push(group);
		self.redo.clear();
	}

	pub fn pop_undo(&mut self) -> Option<Vec<Edit>> {
		self.undo.pop()
	}

	pub fn pop_redo(&mut self) -> Option<Vec<Edit>> {
		self.redo.pop()
	}

	pub fn push_undo(&mut self, group: Vec<Edit>) {
		self.undo.push(group);
	}

	pub fn push_redo(&mut self, group: Vec<Edit>) {
		self.redo.push(group);
	}
}
