//! Drag-and-drop relocation of nodes.
//!
//! A drop is two buffer edits: writing the moved text at the destination
//! and clearing the source. Each replace shifts everything after it, so the
//! later of the two edits is always issued first, and both run inside one
//! buffer operation so the pair re-renders once.

use tessel_buffer::{TextBuffer, transact};
use tessel_primitives::{BookmarkId, Position, Range};
use tessel_syntax::{NodeId, Parser};
use tracing::{debug, warn};

use super::Engine;
use crate::elements::class;
use crate::error::{EngineError, Result};
use crate::render::Renderer;

/// What a drag carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
	pub source: NodeId,
	pub text: String,
	/// Generation of the tree `source` belongs to.
	pub generation: u64,
}

/// Where something was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
	/// Node under the pointer, if any.
	pub target: Option<NodeId>,
	/// Position the drop target names explicitly.
	pub position: Option<Position>,
	/// Buffer position under the pointer.
	pub pointer: Position,
}

impl DropEvent {
	pub fn on_node(id: NodeId, pointer: Position) -> Self {
		Self {
			target: Some(id),
			position: None,
			pointer,
		}
	}

	pub fn at(pointer: Position) -> Self {
		Self {
			target: None,
			position: None,
			pointer,
		}
	}
}

/// Why a drop changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
	/// No drag was in flight.
	NoDrag,
	Inactive,
	/// The source belongs to a tree that has since been replaced.
	Stale,
	/// The destination is the source or one of its edges.
	NoOp,
	/// The destination lies inside the source.
	IntoOwnRange,
	/// Nothing under the pointer accepts drops.
	NotATarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
	/// The moved text now spans this range.
	Moved(Range),
	Ignored(DropRejection),
}

#[derive(Debug, Clone, Copy)]
enum Destination {
	/// A literal or blank whose text the moved text replaces.
	Replace(NodeId, Range),
	Insert(Position),
}

impl<B: TextBuffer, P: Parser, R: Renderer> Engine<B, P, R> {
	pub fn drag_payload(&self) -> Option<&DragPayload> {
		self.drag.as_ref()
	}

	/// The highlighted drop target: `Some(None)` is the background.
	pub fn drop_hover(&self) -> Option<Option<NodeId>> {
		self.hover
	}

	/// Rewrites moved text before it is inserted at a position.
	pub fn set_pre_insert_hook(&mut self, hook: impl FnMut(&str, Position) -> String + 'static) {
		self.pre_insert = Some(Box::new(hook));
	}

	/// Called with the inserted text and where it landed.
	pub fn set_post_insert_hook(&mut self, hook: impl FnMut(&str, Position) + 'static) {
		self.post_insert = Some(Box::new(hook));
	}

	pub fn drag_start(&mut self, id: NodeId) -> Result<()> {
		if !self.mode.is_active() {
			return Err(EngineError::Inactive);
		}
		let range = self.node_range(id)?;
		self.drag_cancel();
		let text = self.buffer.slice(range);
		if let Some(el) = self.elements.get_mut(id) {
			el.add_class(class::DRAGGING);
		}
		debug!(node = %id, %range, "drag started");
		self.drag = Some(DragPayload {
			source: id,
			text,
			generation: self.generation,
		});
		Ok(())
	}

	/// The innermost element at or around `target` that accepts drops.
	/// `None` targets are the background, which always does.
	fn drop_target_for(&self, target: Option<NodeId>) -> Option<Option<NodeId>> {
		let Some(mut id) = target else {
			return Some(None);
		};
		let tree = self.tree.as_ref()?;
		loop {
			let node = tree.get(id)?;
			let eligible = node.kind.is_editable() || self.elements.get(id).is_some_and(|el| el.drop_target);
			if eligible {
				return Some(Some(id));
			}
			id = node.parent?;
		}
	}

	/// The pointer entered `target` during a drag. Returns true if it is a
	/// valid drop target.
	pub fn drag_enter(&mut self, target: Option<NodeId>) -> bool {
		if self.drag.is_none() {
			return false;
		}
		match self.drop_target_for(target) {
			Some(hover) => {
				self.set_hover(Some(hover));
				true
			}
			None => false,
		}
	}

	pub fn drag_leave(&mut self, target: Option<NodeId>) {
		if self.hover.is_some() && self.drop_target_for(target) == self.hover {
			self.set_hover(None);
		}
	}

	fn set_hover(&mut self, hover: Option<Option<NodeId>>) {
		if let Some(Some(old)) = self.hover
			&& let Some(el) = self.elements.get_mut(old)
		{
			el.remove_class(class::DROP_HOVER);
		}
		self.hover = hover;
		if let Some(Some(new)) = hover
			&& let Some(el) = self.elements.get_mut(new)
		{
			el.add_class(class::DROP_HOVER);
		}
	}

	/// Ends a drag without dropping. Returns false if none was in flight.
	pub fn drag_cancel(&mut self) -> bool {
		let Some(payload) = self.drag.take() else {
			return false;
		};
		self.clear_drag_classes(&payload);
		true
	}

	fn clear_drag_classes(&mut self, payload: &DragPayload) {
		if payload.generation == self.generation
			&& let Some(el) = self.elements.get_mut(payload.source)
		{
			el.remove_class(class::DRAGGING);
		}
		self.set_hover(None);
	}

	/// Moves the dragged node's text to the drop destination.
	///
	/// The destination is resolved like hover highlighting: the innermost
	/// element at or around the pointer that accepts drops. A literal or
	/// blank is replaced; anywhere else the text is inserted at the event's
	/// position.
	pub fn drop_at(&mut self, event: DropEvent) -> Result<DropOutcome> {
		let Some(payload) = self.drag.take() else {
			return Ok(DropOutcome::Ignored(DropRejection::NoDrag));
		};
		self.clear_drag_classes(&payload);
		let Some(tree) = self.tree.as_ref().filter(|_| self.mode.is_active()) else {
			return Ok(DropOutcome::Ignored(DropRejection::Inactive));
		};

		let source = match tree.get(payload.source) {
			Some(node) if payload.generation == self.generation => node.range,
			_ => {
				warn!(
					node = %payload.source,
					generation = payload.generation,
					current = self.generation,
					"drop from a stale drag ignored"
				);
				return Ok(DropOutcome::Ignored(DropRejection::Stale));
			}
		};

		let Some(target) = self.drop_target_for(event.target) else {
			debug!(node = %payload.source, target = ?event.target, "dropped outside any drop target");
			return Ok(DropOutcome::Ignored(DropRejection::NotATarget));
		};
		let dest = match target.and_then(|id| tree.get(id)).filter(|n| n.kind.is_editable()) {
			Some(node) => Destination::Replace(node.id, node.range),
			None => Destination::Insert(self.buffer.clip_pos(event.position.unwrap_or(event.pointer))),
		};
		let rejection = match dest {
			Destination::Replace(id, _) if id == payload.source => Some(DropRejection::NoOp),
			Destination::Replace(id, _) if tree.is_ancestor_or_self(payload.source, id) => {
				Some(DropRejection::IntoOwnRange)
			}
			Destination::Insert(pos) if pos == source.from || pos == source.to => Some(DropRejection::NoOp),
			Destination::Insert(pos) if source.contains(pos) => Some(DropRejection::IntoOwnRange),
			_ => None,
		};
		if let Some(rejection) = rejection {
			debug!(node = %payload.source, ?rejection, "drop ignored");
			return Ok(DropOutcome::Ignored(rejection));
		}

		let moved = match dest {
			Destination::Replace(_, range) => self.move_replacing(source, range, &payload.text),
			Destination::Insert(at) => self.move_inserting(source, at, payload.text),
		};
		debug!(node = %payload.source, %source, %moved, "dropped");
		self.sync()?;
		self.focus_range(moved);
		Ok(DropOutcome::Moved(moved))
	}

	fn move_replacing(&mut self, source: Range, dest: Range, text: &str) -> Range {
		let bookmark = self.buffer.set_bookmark(dest.from);
		transact(&mut self.buffer, |buf| {
			if source.from < dest.from {
				buf.replace(dest, text);
				buf.replace(source, "");
			} else {
				buf.replace(source, "");
				buf.replace(dest, text);
			}
		});
		self.landed(bookmark, dest.from, text)
	}

	fn move_inserting(&mut self, source: Range, at: Position, text: String) -> Range {
		let text = match self.pre_insert.as_mut() {
			Some(hook) => hook(&text, at),
			None => text,
		};
		let bookmark = self.buffer.set_bookmark(at);
		transact(&mut self.buffer, |buf| {
			if source.from < at {
				buf.replace(Range::point(at), &text);
				buf.replace(source, "");
			} else {
				buf.replace(source, "");
				buf.replace(Range::point(at), &text);
			}
		});
		let moved = self.landed(bookmark, at, &text);
		if let Some(hook) = self.post_insert.as_mut() {
			hook(&text, moved.from);
		}
		moved
	}

	fn landed(&mut self, bookmark: BookmarkId, fallback: Position, text: &str) -> Range {
		let start = self.buffer.resolve_bookmark(bookmark).unwrap_or(fallback);
		self.buffer.clear_bookmark(bookmark);
		Range::new(start, start.advance(text))
	}
}
