use tessel_primitives::{Position, Range};
use thiserror::Error;

use super::{Node, NodeId, NodeKind, Tree};

/// A structural inconsistency caught while building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
	/// A node starts before its previous sibling ends.
	#[error("node at {0} overlaps its previous sibling")]
	Overlap(Position),
	/// A node starts before its parent or ends after it.
	#[error("node at {0} escapes its parent")]
	OutsideParent(Position),
	/// `close` with no open node.
	#[error("close at {0} without an open node")]
	Unbalanced(Position),
	/// `finish` with nodes still open.
	#[error("node opened at {0} was never closed")]
	Unclosed(Position),
}

impl TreeError {
	pub fn position(&self) -> Position {
		match *self {
			TreeError::Overlap(at) | TreeError::OutsideParent(at) | TreeError::Unbalanced(at) | TreeError::Unclosed(at) => at,
		}
	}
}

/// Incremental tree construction in document order.
///
/// Nodes are pushed as they are encountered; structural nodes bracket their
/// children with [`open`](Self::open) and [`close`](Self::close). Sibling
/// ordering and parent nesting are checked on every push.
#[derive(Debug, Default)]
pub struct TreeBuilder {
	nodes: Vec<Node>,
	roots: Vec<NodeId>,
	open: Vec<NodeId>,
}

impl TreeBuilder {
	fn push(&mut self, kind: NodeKind, range: Range) -> Result<NodeId, TreeError> {
		let parent = self.open.last().copied();
		let siblings = match parent {
			Some(p) => &self.nodes[p.index()].children,
			None => &self.roots,
		};
		if let Some(prev) = siblings.last()
			&& self.nodes[prev.index()].range.to > range.from
		{
			return Err(TreeError::Overlap(range.from));
		}
		if let Some(p) = parent
			&& self.nodes[p.index()].range.from > range.from
		{
			return Err(TreeError::OutsideParent(range.from));
		}

		let id = NodeId(self.nodes.len() as u32);
		self.nodes.push(Node {
			id,
			kind,
			range,
			children: Vec::new(),
			parent,
			quarantine: None,
		});
		match parent {
			Some(p) => self.nodes[p.index()].children.push(id),
			None => self.roots.push(id),
		}
		Ok(id)
	}

	/// Adds a childless node.
	pub fn leaf(&mut self, kind: NodeKind, range: Range) -> Result<NodeId, TreeError> {
		self.push(kind, range)
	}

	/// Starts a node whose children follow.
	pub fn open(&mut self, kind: NodeKind, from: Position) -> Result<NodeId, TreeError> {
		let id = self.push(kind, Range::point(from))?;
		self.open.push(id);
		Ok(id)
	}

	/// Ends the innermost open node at `to`.
	pub fn close(&mut self, to: Position) -> Result<NodeId, TreeError> {
		let id = self.open.pop().ok_or(TreeError::Unbalanced(to))?;
		let node = &self.nodes[id.index()];
		let last_child_end = node.children.last().map(|c| self.nodes[c.index()].range.to);
		if to < node.range.from || last_child_end.is_some_and(|end| end > to) {
			return Err(TreeError::OutsideParent(to));
		}
		self.nodes[id.index()].range.to = to;
		Ok(id)
	}

	/// Finishes the tree. Fails if a node is still open.
	pub fn finish(self) -> Result<Tree, TreeError> {
		if let Some(id) = self.open.first() {
			return Err(TreeError::Unclosed(self.nodes[id.index()].range.from));
		}
		Ok(Tree {
			nodes: self.nodes,
			roots: self.roots,
		})
	}
}
