//! Visual elements bound to tree nodes.
//!
//! Elements live in an arena indexed by [`NodeId`], so resolving an element
//! back to its node is an index, not a lookup through string attributes. The
//! arena is cleared wholesale on every re-render.

use smallvec::SmallVec;
use tessel_primitives::{BookmarkId, Range};
use tessel_syntax::NodeId;

/// Class names the engine toggles on elements.
pub mod class {
	pub const BLOCK: &str = "tessel-block";
	pub const SELECTED: &str = "tessel-selected";
	pub const EDITING: &str = "tessel-editing";
	pub const ERROR: &str = "tessel-error";
	pub const DRAGGING: &str = "tessel-dragging";
	pub const DROP_HOVER: &str = "tessel-drop-hover";
	pub const DROP_TARGET: &str = "tessel-drop-target";
	pub const QUARANTINE: &str = "tessel-quarantine";
}

/// Where an element sits in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
	/// Covers a range of buffer text.
	Range(Range),
	/// Floats at a bookmark; used for provisional nodes with no text yet.
	Bookmark(BookmarkId),
}

/// The on-screen counterpart of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	pub node: NodeId,
	pub anchor: Anchor,
	/// Displayed content; the edit buffer while the element is editable.
	pub text: String,
	pub classes: SmallVec<[&'static str; 4]>,
	pub editable: bool,
	/// Suppressed by presentation state, e.g. a collapsed parent.
	pub hidden: bool,
	/// Accepts drops even though its node is not replaceable.
	pub drop_target: bool,
	pub tooltip: Option<String>,
	/// Nesting depth below the root, for indentation.
	pub depth: usize,
}

impl Element {
	pub fn new(node: NodeId, anchor: Anchor, text: impl Into<String>) -> Self {
		Self {
			node,
			anchor,
			text: text.into(),
			classes: SmallVec::new(),
			editable: false,
			hidden: false,
			drop_target: false,
			tooltip: None,
			depth: 0,
		}
	}

	pub fn has_class(&self, class: &str) -> bool {
		self.classes.iter().any(|c| *c == class)
	}

	pub fn add_class(&mut self, class: &'static str) {
		if !self.has_class(class) {
			self.classes.push(class);
		}
	}

	pub fn remove_class(&mut self, class: &str) {
		self.classes.retain(|c| *c != class);
	}

	pub fn set_class(&mut self, class: &'static str, on: bool) {
		if on {
			self.add_class(class);
		} else {
			self.remove_class(class);
		}
	}
}

/// Element arena indexed by node id.
#[derive(Debug, Default)]
pub struct Elements {
	slots: Vec<Option<Element>>,
	len: usize,
}

impl Elements {
	/// Binds `element` to its node, replacing any previous binding.
	pub fn attach(&mut self, element: Element) {
		let idx = element.node.index();
		if idx >= self.slots.len() {
			self.slots.resize_with(idx + 1, || None);
		}
		if self.slots[idx].replace(element).is_none() {
			self.len += 1;
		}
	}

	pub fn get(&self, id: NodeId) -> Option<&Element> {
		self.slots.get(id.index()).and_then(Option::as_ref)
	}

	pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
		self.slots.get_mut(id.index()).and_then(Option::as_mut)
	}

	/// Returns true if the node has no element or its element is hidden.
	pub fn is_hidden(&self, id: NodeId) -> bool {
		self.get(id).is_none_or(|el| el.hidden)
	}

	/// Drops every element.
	pub fn clear(&mut self) {
		self.slots.clear();
		self.len = 0;
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn iter(&self) -> impl Iterator<Item = &Element> {
		self.slots.iter().flatten()
	}
}

#[cfg(test)]
mod tests {
	use tessel_primitives::{Position, Range};

	use super::*;

	fn element(id: u32) -> Element {
		Element::new(NodeId(id), Anchor::Range(Range::point(Position::ZERO)), "x")
	}

	#[test]
	fn attach_and_resolve() {
		let mut els = Elements::default();
		els.attach(element(3));
		els.attach(element(0));
		assert_eq!(els.len(), 2);
		assert_eq!(els.get(NodeId(3)).unwrap().node, NodeId(3));
		assert!(els.get(NodeId(1)).is_none());
		assert!(els.is_hidden(NodeId(1)));

		els.attach(element(3));
		assert_eq!(els.len(), 2);
		els.clear();
		assert!(els.is_empty());
		assert!(els.get(NodeId(3)).is_none());
	}

	#[test]
	fn class_toggling_is_idempotent() {
		let mut el = element(0);
		el.add_class(class::SELECTED);
		el.add_class(class::SELECTED);
		assert_eq!(el.classes.len(), 1);
		el.set_class(class::SELECTED, false);
		assert!(!el.has_class(class::SELECTED));
	}
}
