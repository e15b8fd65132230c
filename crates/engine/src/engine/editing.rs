//! In-place editing of literal and blank nodes.
//!
//! A session holds the edited text apart from the buffer. Committing checks
//! it with [`Parser::lex`] and then parses the document it would produce;
//! valid text replaces the node's range, invalid text puts the session into
//! [`EditState::Erroring`] and raises the engine's invalid-edit flag until
//! the edit is fixed or cancelled.

use tessel_buffer::TextBuffer;
use tessel_primitives::Range;
use tessel_syntax::{NodeId, NodeKind, ParseError, Parser};
use tracing::{debug, trace, warn};

use super::{Engine, PROVISIONAL_NODE};
use crate::deferred::Task;
use crate::elements::class;
use crate::error::{EngineError, Result};
use crate::render::Renderer;

/// What an edit session is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
	Node(NodeId),
	/// The provisional node of a quarantined insertion.
	Provisional,
}

impl EditTarget {
	fn node(self) -> NodeId {
		match self {
			EditTarget::Node(id) => id,
			EditTarget::Provisional => PROVISIONAL_NODE,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
	Editing,
	/// The last commit attempt failed validation.
	Erroring,
}

/// Text being edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
	pub id: u64,
	pub target: EditTarget,
	/// Text before editing started, restored on cancel.
	pub original: String,
	pub text: String,
	/// Selection within `text` in chars. Equal ends are a caret.
	pub anchor: usize,
	pub head: usize,
	pub state: EditState,
}

fn byte_offset(s: &str, chars: usize) -> usize {
	s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

impl EditSession {
	fn new(id: u64, target: EditTarget, original: String, text: String, select_all: bool) -> Self {
		let len = text.chars().count();
		Self {
			id,
			target,
			original,
			text,
			anchor: if select_all { 0 } else { len },
			head: len,
			state: EditState::Editing,
		}
	}

	fn len(&self) -> usize {
		self.text.chars().count()
	}

	/// Selected span as `(start, end)` char offsets.
	pub fn selection(&self) -> (usize, usize) {
		(self.anchor.min(self.head), self.anchor.max(self.head))
	}

	fn replace_selection(&mut self, from: usize, to: usize, s: &str) {
		let (a, b) = (byte_offset(&self.text, from), byte_offset(&self.text, to));
		self.text.replace_range(a..b, s);
		self.anchor = from + s.chars().count();
		self.head = self.anchor;
	}

	pub fn insert(&mut self, s: &str) {
		let (from, to) = self.selection();
		self.replace_selection(from, to, s);
	}

	pub fn delete_backward(&mut self) {
		let (from, to) = self.selection();
		let from = if from == to { from.saturating_sub(1) } else { from };
		self.replace_selection(from, to, "");
	}

	pub fn delete_forward(&mut self) {
		let (from, to) = self.selection();
		let to = if from == to { (to + 1).min(self.len()) } else { to };
		self.replace_selection(from, to, "");
	}

	pub fn move_left(&mut self) {
		let (from, to) = self.selection();
		self.head = if from == to { from.saturating_sub(1) } else { from };
		self.anchor = self.head;
	}

	pub fn move_right(&mut self) {
		let (from, to) = self.selection();
		self.head = if from == to { (to + 1).min(self.len()) } else { to };
		self.anchor = self.head;
	}

	pub fn move_home(&mut self) {
		self.anchor = 0;
		self.head = 0;
	}

	pub fn move_end(&mut self) {
		self.anchor = self.len();
		self.head = self.anchor;
	}
}

/// Result of ending an edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
	/// The text entered the buffer at this range.
	Committed(Range),
	/// Validation failed; the session is now erroring.
	Rejected,
	/// An empty provisional edit was dropped.
	Abandoned,
	NotEditing,
}

impl<B: TextBuffer, P: Parser, R: Renderer> Engine<B, P, R> {
	pub fn edit_session(&self) -> Option<&EditSession> {
		self.edit.as_ref()
	}

	/// True while a rejected edit is waiting to be fixed or cancelled.
	/// Pointer selection and double activation are ignored meanwhile.
	pub fn invalid_edit_outstanding(&self) -> bool {
		self.invalid_edit
	}

	/// Starts editing a literal or blank node with its whole text selected.
	pub fn begin_edit(&mut self, id: NodeId) -> Result<()> {
		if !self.mode.is_active() {
			return Err(EngineError::Inactive);
		}
		let node = self.tree_ref()?.get(id).ok_or(EngineError::StaleNode(id))?;
		let (kind, range) = (node.kind, node.range);
		if !kind.is_editable() {
			return Err(EngineError::NotEditable(id));
		}
		if let Some(session) = &self.edit {
			if session.target == EditTarget::Node(id) {
				return Ok(());
			}
			return Err(EngineError::EditInProgress);
		}

		let original = self.buffer.slice(range);
		self.open_session(EditTarget::Node(id), original.clone(), original, true);
		self.select(id)?;
		debug!(node = %id, %range, "editing");
		Ok(())
	}

	/// Pointer double activation. Returns false if it was suppressed.
	pub fn double_click(&mut self, id: NodeId) -> Result<bool> {
		if self.invalid_edit {
			debug!(node = %id, "double click ignored while an invalid edit is outstanding");
			return Ok(false);
		}
		self.begin_edit(id)?;
		Ok(true)
	}

	pub(super) fn open_session(&mut self, target: EditTarget, original: String, text: String, select_all: bool) {
		self.next_session += 1;
		let session = EditSession::new(self.next_session, target, original, text, select_all);
		if let Some(el) = self.element_mut(target.node()) {
			el.editable = true;
			el.add_class(class::EDITING);
			el.text.clone_from(&session.text);
		}
		self.edit = Some(session);
	}

	fn with_session(&mut self, f: impl FnOnce(&mut EditSession)) -> bool {
		let Some(session) = self.edit.as_mut() else {
			return false;
		};
		f(session);
		session.state = EditState::Editing;
		let (target, text) = (session.target.node(), session.text.clone());
		if let Some(el) = self.element_mut(target) {
			el.text = text;
		}
		true
	}

	/// Types `text` over the session's selection.
	pub fn edit_insert(&mut self, text: &str) -> bool {
		self.with_session(|s| s.insert(text))
	}

	pub fn edit_backspace(&mut self) -> bool {
		self.with_session(EditSession::delete_backward)
	}

	pub fn edit_delete(&mut self) -> bool {
		self.with_session(EditSession::delete_forward)
	}

	pub fn edit_left(&mut self) -> bool {
		self.with_session(EditSession::move_left)
	}

	pub fn edit_right(&mut self) -> bool {
		self.with_session(EditSession::move_right)
	}

	pub fn edit_home(&mut self) -> bool {
		self.with_session(EditSession::move_home)
	}

	pub fn edit_end(&mut self) -> bool {
		self.with_session(EditSession::move_end)
	}

	/// Focus left the edited element.
	pub fn blur(&mut self) -> Result<EditOutcome> {
		self.commit_edit()
	}

	/// Validates the session's text and, if it is a single literal, writes
	/// it to the buffer.
	pub fn commit_edit(&mut self) -> Result<EditOutcome> {
		self.enter_pending_edit();
		let Some(session) = self.edit.take() else {
			return Ok(EditOutcome::NotEditing);
		};

		if session.target == EditTarget::Provisional && session.text.trim().is_empty() {
			debug!("empty provisional edit dropped");
			self.invalid_edit = false;
			self.abandon_provisional();
			return Ok(EditOutcome::Abandoned);
		}
		if let Err(err) = self.parser.lex(&session.text) {
			self.reject_edit(session, &err);
			return Ok(EditOutcome::Rejected);
		}
		match session.target {
			EditTarget::Node(id) => self.commit_node(id, session),
			EditTarget::Provisional => self.commit_provisional(session),
		}
	}

	fn commit_node(&mut self, id: NodeId, session: EditSession) -> Result<EditOutcome> {
		let range = self.node_range(id)?;
		if let Err(err) = self.check_splice(range, &session.text) {
			self.reject_edit(session, &err);
			return Ok(EditOutcome::Rejected);
		}
		self.invalid_edit = false;
		self.close_element(id);
		self.buffer.replace(range, &session.text);
		let committed = Range::new(range.from, range.from.advance(&session.text));
		debug!(node = %id, %committed, "edit committed");
		self.sync()?;
		self.focus_range(committed);
		Ok(EditOutcome::Committed(committed))
	}

	pub(super) fn reject_edit(&mut self, mut session: EditSession, err: &ParseError) {
		let message = match self.parser.error_message(err) {
			Ok(message) => message,
			Err(e) => {
				warn!(error = %e, "could not describe edit error");
				String::new()
			}
		};
		debug!(target = ?session.target, error = %err, "edit rejected");
		session.state = EditState::Erroring;
		if let Some(el) = self.element_mut(session.target.node()) {
			el.add_class(class::ERROR);
			el.tooltip = Some(message);
		}
		self.invalid_edit = true;
		let id = session.id;
		self.edit = Some(session);
		self.schedule(Task::RefocusEdit { session: id }, self.config.delays.refocus());
	}

	/// Puts a rejected session back into editing with its text selected.
	pub(super) fn refocus_edit(&mut self, session: u64) {
		let target = match self.edit.as_mut() {
			Some(s) if s.id == session && s.state == EditState::Erroring => {
				s.state = EditState::Editing;
				s.anchor = 0;
				s.head = s.len();
				s.target
			}
			_ => {
				trace!(session, "dropping stale edit refocus");
				return;
			}
		};
		if let EditTarget::Node(id) = target {
			self.set_focus(Some(id));
		}
	}

	/// Escape: restores the original text without touching the buffer.
	pub fn cancel_edit(&mut self) -> bool {
		let Some(session) = self.edit.take() else {
			return false;
		};
		self.invalid_edit = false;
		match session.target {
			EditTarget::Node(id) => {
				self.close_element(id);
				if let Some(el) = self.elements.get_mut(id) {
					el.text = session.original;
				}
			}
			EditTarget::Provisional => self.abandon_provisional(),
		}
		debug!(target = ?session.target, "edit cancelled");
		true
	}

	fn close_element(&mut self, id: NodeId) {
		if let Some(el) = self.element_mut(id) {
			el.editable = false;
			el.remove_class(class::EDITING);
			el.remove_class(class::ERROR);
			el.tooltip = None;
		}
	}

	/// Re-attaches the session to the node that replaced its target after a
	/// re-render, or drops it when there is none.
	pub(super) fn rebind_session(&mut self, previous: Option<(Range, NodeKind)>) {
		let Some(EditTarget::Node(_)) = self.edit.as_ref().map(|s| s.target) else {
			return;
		};
		match previous.and_then(|key| self.find_node(key)) {
			Some(id) => {
				let Some(session) = self.edit.as_mut() else {
					return;
				};
				session.target = EditTarget::Node(id);
				let (text, erroring) = (session.text.clone(), session.state == EditState::Erroring);
				if let Some(el) = self.elements.get_mut(id) {
					el.editable = true;
					el.add_class(class::EDITING);
					el.set_class(class::ERROR, erroring);
					el.text = text;
				}
			}
			None => {
				warn!("edited node disappeared in a re-render; dropping the edit");
				self.edit = None;
				self.invalid_edit = false;
			}
		}
	}
}
