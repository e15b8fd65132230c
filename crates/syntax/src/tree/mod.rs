mod builder;


use std::fmt;

pub use builder::{TreeBuilder, TreeError};
use tessel_primitives::{BookmarkId, Position, Range};

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
	#[inline]
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "node#{}", self.0)
	}
}

/// The closed set of node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// An atom whose text can be edited in place.
	Literal,
	/// A placeholder hole waiting for a value.
	Blank,
	Whitespace,
	Comment,
	/// A structural node with children.
	Expression,
}

impl NodeKind {
	/// Literal and blank nodes can be edited in place and replaced by drops.
	pub fn is_editable(self) -> bool {
		matches!(self, NodeKind::Literal | NodeKind::Blank)
	}

	pub fn name(self) -> &'static str {
		match self {
			NodeKind::Literal => "literal",
			NodeKind::Blank => "blank",
			NodeKind::Whitespace => "whitespace",
			NodeKind::Comment => "comment",
			NodeKind::Expression => "expression",
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// One addressable node of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
	pub id: NodeId,
	pub kind: NodeKind,
	pub range: Range,
	pub children: Vec<NodeId>,
	pub parent: Option<NodeId>,
	/// Bookmark anchoring a provisional node that has no buffer text yet.
	pub quarantine: Option<BookmarkId>,
}

impl Node {
	/// Creates a free-standing literal at `at` with zero width, anchored to
	/// `bookmark` instead of to buffer text.
	pub fn provisional(id: NodeId, at: Position, bookmark: BookmarkId) -> Self {
		Self {
			id,
			kind: NodeKind::Literal,
			range: Range::point(at),
			children: Vec::new(),
			parent: None,
			quarantine: Some(bookmark),
		}
	}

	pub fn is_provisional(&self) -> bool {
		self.quarantine.is_some()
	}
}

/// The parsed structure of a whole buffer at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
	nodes: Vec<Node>,
	roots: Vec<NodeId>,
}

impl Tree {
	pub fn builder() -> TreeBuilder {
		TreeBuilder::default()
	}

	/// Root nodes in document order.
	pub fn roots(&self) -> &[NodeId] {
		&self.roots
	}

	pub fn get(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.index())
	}

	pub fn contains(&self, id: NodeId) -> bool {
		id.index() < self.nodes.len()
	}

	/// Number of nodes, roots and descendants.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Every node, in arena order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter()
	}

	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.get(id).map(|n| n.children.as_slice()).unwrap_or_default()
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.get(id).and_then(|n| n.parent)
	}

	/// Every node in document order, parents before their children.
	pub fn preorder(&self) -> Vec<NodeId> {
		let mut out = Vec::with_capacity(self.nodes.len());
		let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
		while let Some(id) = stack.pop() {
			out.push(id);
			stack.extend(self.children(id).iter().rev().copied());
		}
		out
	}

	/// The innermost node whose range contains `pos`.
	pub fn node_at(&self, pos: Position) -> Option<NodeId> {
		let mut level = self.roots.as_slice();
		let mut found = None;
		loop {
			let idx = level.partition_point(|id| self.nodes[id.index()].range.to <= pos);
			match level.get(idx) {
				Some(&id) if self.nodes[id.index()].range.contains(pos) => {
					found = Some(id);
					level = self.children(id);
				}
				_ => return found,
			}
		}
	}

	/// Nodes whose ranges lie entirely within `range`, in document order.
	pub fn nodes_in(&self, range: Range) -> Vec<NodeId> {
		self.preorder()
			.into_iter()
			.filter(|id| range.contains_range(&self.nodes[id.index()].range))
			.collect()
	}

	/// Returns true if `ancestor` is `id` or one of its ancestors.
	pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
		let mut cursor = Some(id);
		while let Some(current) = cursor {
			if current == ancestor {
				return true;
			}
			cursor = self.parent(current);
		}
		false
	}
}
