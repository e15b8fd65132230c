use tessel_buffer::TextBuffer;
use tessel_primitives::Position;
use tessel_syntax::{NodeId, Parser};
use tracing::{debug, trace};

use super::Engine;
use crate::error::Result;
use crate::render::Renderer;

/// Where a visible-node walk starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOrigin {
	Node(NodeId),
	/// A raw buffer position, when no node has focus.
	Cursor(Position),
}

impl<B: TextBuffer, P: Parser, R: Renderer> Engine<B, P, R> {
	/// The focused node, if it belongs to the current tree.
	pub fn selected_node(&self) -> Option<NodeId> {
		let id = self.focus?;
		self.tree.as_ref()?.contains(id).then_some(id)
	}

	/// The first visible node after `from` in document order, or `None` past
	/// the last one.
	pub fn next_visible(&self, from: NavOrigin) -> Option<NodeId> {
		let tree = self.tree.as_ref()?;
		let order = tree.preorder();
		let start = match from {
			NavOrigin::Node(id) => order.iter().position(|&n| n == id)? + 1,
			NavOrigin::Cursor(pos) => {
				order.partition_point(|&n| tree.get(n).is_some_and(|node| node.range.from < pos))
			}
		};
		order[start..].iter().copied().find(|&id| !self.elements.is_hidden(id))
	}

	/// The last visible node before `from` in document order, or `None`
	/// before the first one.
	pub fn previous_visible(&self, from: NavOrigin) -> Option<NodeId> {
		let tree = self.tree.as_ref()?;
		let order = tree.preorder();
		let end = match from {
			NavOrigin::Node(id) => order.iter().position(|&n| n == id)?,
			NavOrigin::Cursor(pos) => {
				order.partition_point(|&n| tree.get(n).is_some_and(|node| node.range.from < pos))
			}
		};
		order[..end].iter().rev().copied().find(|&id| !self.elements.is_hidden(id))
	}

	fn nav_origin(&self) -> NavOrigin {
		match self.selected_node() {
			Some(id) => NavOrigin::Node(id),
			None => NavOrigin::Cursor(self.buffer.cursor()),
		}
	}

	/// Focuses `id` and scrolls the buffer to its start.
	pub fn select(&mut self, id: NodeId) -> Result<()> {
		let range = self.node_range(id)?;
		self.set_focus(Some(id));
		self.buffer.scroll_into_view(range.from);
		trace!(node = %id, %range, "selected");
		Ok(())
	}

	/// Moves focus back to the plain buffer cursor.
	pub fn clear_selection(&mut self) {
		self.set_focus(None);
	}

	/// Selects the next visible node. Returns it, or `None` at the end.
	pub fn select_next(&mut self) -> Result<Option<NodeId>> {
		let next = self.next_visible(self.nav_origin());
		if let Some(id) = next {
			self.select(id)?;
		}
		Ok(next)
	}

	pub fn select_previous(&mut self) -> Result<Option<NodeId>> {
		let previous = self.previous_visible(self.nav_origin());
		if let Some(id) = previous {
			self.select(id)?;
		}
		Ok(previous)
	}

	/// Pointer selection. Returns false if it was suppressed.
	pub fn click(&mut self, id: NodeId) -> Result<bool> {
		if self.invalid_edit {
			debug!(node = %id, "click ignored while an invalid edit is outstanding");
			return Ok(false);
		}
		self.select(id)?;
		Ok(true)
	}

	/// Toolbar selection: selects `id`, or clears the selection if `id` is
	/// already selected. Returns whether `id` is selected afterwards.
	pub fn toggle_select(&mut self, id: NodeId) -> Result<bool> {
		if self.invalid_edit {
			debug!(node = %id, "selection toggle ignored while an invalid edit is outstanding");
			return Ok(self.selected_node() == Some(id));
		}
		if self.selected_node() == Some(id) {
			self.clear_selection();
			return Ok(false);
		}
		self.select(id)?;
		Ok(true)
	}
}
