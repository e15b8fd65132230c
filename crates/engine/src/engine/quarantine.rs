//! Provisional insertion of typed or pasted text.
//!
//! Free typing must not reach the buffer before it forms a valid token, or
//! the next re-render would fail to parse. Input arriving with nothing under
//! edit creates a provisional node instead: a zero-width literal anchored to
//! a bookmark at the cursor. It is edited like any literal and only its
//! commit writes text into the buffer.

use tessel_buffer::TextBuffer;
use tessel_primitives::Range;
use tessel_syntax::{Node, NodeId, Parser};
use tracing::{debug, trace, warn};

use super::{EditOutcome, EditSession, EditTarget, Engine};
use crate::deferred::Task;
use crate::elements::{Element, class};
use crate::error::Result;
use crate::render::Renderer;

/// Id reserved for the provisional node. Never issued by a parse.
pub const PROVISIONAL_NODE: NodeId = NodeId(u32::MAX);

/// A node that exists on screen but not yet in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisional {
	pub node: Node,
	pub element: Element,
	pub seq: u64,
}

/// Lifecycle of a quarantined insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Quarantine {
	#[default]
	Idle,
	Provisional(Provisional),
	/// The last provisional text entered the buffer here, separator included.
	Committed(Range),
}

impl Quarantine {
	pub fn provisional(&self) -> Option<&Provisional> {
		match self {
			Quarantine::Provisional(p) => Some(p),
			_ => None,
		}
	}

	pub(super) fn provisional_mut(&mut self) -> Option<&mut Provisional> {
		match self {
			Quarantine::Provisional(p) => Some(p),
			_ => None,
		}
	}

	pub fn is_provisional(&self) -> bool {
		matches!(self, Quarantine::Provisional(_))
	}
}

impl<B: TextBuffer, P: Parser, R: Renderer> Engine<B, P, R> {
	pub fn quarantine(&self) -> &Quarantine {
		&self.quarantine
	}

	/// Typed text. Goes into the edit session if there is one, otherwise into
	/// a provisional node. Returns false when block mode is off and the
	/// buffer should handle the input itself.
	pub fn input(&mut self, text: &str) -> bool {
		if text.is_empty() || !self.mode.is_active() {
			return false;
		}
		if self.edit.is_some() {
			return self.edit_insert(text);
		}
		if let Some(p) = self.quarantine.provisional_mut() {
			p.element.text.push_str(text);
			return true;
		}
		self.enter_quarantine(text);
		true
	}

	/// Pasted text. Handled exactly like typing it.
	pub fn paste(&mut self, text: &str) -> bool {
		self.input(text)
	}

	fn enter_quarantine(&mut self, text: &str) {
		let at = self.buffer.cursor();
		let bookmark = self.buffer.set_bookmark(at);
		let node = Node::provisional(PROVISIONAL_NODE, at, bookmark);
		let mut element = self.renderer.render_provisional(&node, text);
		element.add_class(class::QUARANTINE);

		self.next_quarantine += 1;
		let seq = self.next_quarantine;
		self.quarantine = Quarantine::Provisional(Provisional { node, element, seq });
		self.set_focus(None);
		self.schedule(Task::EnterEdit { seq }, self.config.delays.edit_entry());
		debug!(%at, seq, "input quarantined");
	}

	/// Starts editing provisional node `seq` with the caret after its text.
	pub(super) fn enter_provisional_edit(&mut self, seq: u64) {
		let text = match self.quarantine.provisional() {
			Some(p) if p.seq == seq && self.edit.is_none() => p.element.text.clone(),
			_ => {
				trace!(seq, "dropping stale edit entry");
				return;
			}
		};
		self.open_session(EditTarget::Provisional, String::new(), text, false);
	}

	/// Opens the provisional node's edit session now rather than after the
	/// entry delay. Returns true if a session is open afterwards.
	pub(super) fn enter_pending_edit(&mut self) -> bool {
		if self.edit.is_none()
			&& let Some(seq) = self.quarantine.provisional().map(|p| p.seq)
		{
			self.deferred.cancel(|t| *t == Task::EnterEdit { seq });
			self.enter_provisional_edit(seq);
		}
		self.edit.is_some()
	}

	/// Discards the provisional node without touching the buffer. Returns
	/// false if there was none.
	pub fn abandon_quarantine(&mut self) -> bool {
		if !self.quarantine.is_provisional() {
			return false;
		}
		if self.edit.as_ref().is_some_and(|s| s.target == EditTarget::Provisional) {
			self.edit = None;
			self.invalid_edit = false;
		}
		self.abandon_provisional();
		true
	}

	pub(super) fn abandon_provisional(&mut self) {
		if !self.quarantine.is_provisional() {
			return;
		}
		if let Quarantine::Provisional(p) = std::mem::take(&mut self.quarantine) {
			if let Some(bookmark) = p.node.quarantine {
				self.buffer.clear_bookmark(bookmark);
			}
			self.deferred.cancel(|t| *t == Task::EnterEdit { seq: p.seq });
			debug!(seq = p.seq, "quarantine abandoned");
		}
	}

	/// Releases the bookmark, then writes the text plus separator at its
	/// last position. Text that would leave the document unparsable is
	/// rejected like text that fails to lex.
	pub(super) fn commit_provisional(&mut self, session: EditSession) -> Result<EditOutcome> {
		let Some(p) = self.quarantine.provisional() else {
			warn!("provisional edit without a provisional node");
			self.invalid_edit = false;
			return Ok(EditOutcome::Abandoned);
		};
		let bookmark = p.node.quarantine;
		let at = bookmark
			.and_then(|b| self.buffer.resolve_bookmark(b))
			.unwrap_or(p.node.range.from);

		let mut text = session.text.clone();
		text.push(self.config.separator);
		if let Err(err) = self.check_splice(Range::point(at), &text) {
			self.reject_edit(session, &err);
			return Ok(EditOutcome::Rejected);
		}
		if let Some(bookmark) = bookmark {
			self.buffer.clear_bookmark(bookmark);
		}

		let literal = Range::new(at, at.advance(&session.text));
		self.buffer.replace(Range::point(at), &text);
		let committed = Range::new(at, at.advance(&text));
		self.buffer.set_cursor(committed.to);
		self.quarantine = Quarantine::Committed(committed);
		self.invalid_edit = false;
		debug!(%committed, "quarantine committed");

		self.sync()?;
		self.focus_range(literal);
		Ok(EditOutcome::Committed(committed))
	}

	/// Moves the provisional node's range onto its bookmark.
	pub(super) fn refresh_provisional(&mut self) {
		let Some(bookmark) = self.quarantine.provisional().and_then(|p| p.node.quarantine) else {
			return;
		};
		let Some(at) = self.buffer.resolve_bookmark(bookmark) else {
			return;
		};
		if let Some(p) = self.quarantine.provisional_mut() {
			p.node.range = Range::point(at);
		}
	}
}
