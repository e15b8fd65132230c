//! The synchronization engine.

mod drag;
mod editing;
mod keyboard;
mod marks;
mod navigation;
mod quarantine;
mod transfer;


use std::time::{Duration, Instant};

pub use drag::{DragPayload, DropEvent, DropOutcome, DropRejection};
pub use editing::{EditOutcome, EditSession, EditState, EditTarget};
pub use keyboard::KeyOutcome;
pub use navigation::NavOrigin;
pub use quarantine::{PROVISIONAL_NODE, Provisional, Quarantine};
use rustc_hash::FxHashSet;
use tessel_buffer::TextBuffer;
use tessel_primitives::{MarkId, Position, Range};
use tessel_syntax::{NodeId, NodeKind, ParseError, Parser, Tree};
use tracing::{debug, trace};

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::EngineConfig;
use crate::deferred::{DeferredQueue, Task};
use crate::elements::{Element, Elements, class};
use crate::error::{EngineError, Result};
use crate::keymap::Keymap;
use crate::mode::Mode;
use crate::render::Renderer;

type PreInsertHook = Box<dyn FnMut(&str, Position) -> String>;
type PostInsertHook = Box<dyn FnMut(&str, Position)>;

/// Mediates every mutation between a block tree and its text buffer.
///
/// The engine is single threaded and driven by calls from its host: pointer
/// and keyboard events, buffer edits followed by [`sync`](Self::sync), and
/// [`tick`](Self::tick) for deferred work.
pub struct Engine<B, P, R: Renderer> {
	buffer: B,
	parser: P,
	renderer: R,
	config: EngineConfig,
	keymap: Keymap,
	mode: Mode,
	tree: Option<Tree>,
	/// Bumped by every re-render; node ids are only valid within one.
	generation: u64,
	elements: Elements,
	focus: Option<NodeId>,
	edit: Option<EditSession>,
	next_session: u64,
	/// Raised while a rejected edit is outstanding.
	invalid_edit: bool,
	quarantine: Quarantine,
	next_quarantine: u64,
	drag: Option<DragPayload>,
	/// Highlighted drop target; `Some(None)` is the background.
	hover: Option<Option<NodeId>>,
	pre_insert: Option<PreInsertHook>,
	post_insert: Option<PostInsertHook>,
	clipboard: Box<dyn Clipboard>,
	transfer: Option<String>,
	deferred: DeferredQueue,
	own_marks: FxHashSet<MarkId>,
}

impl<B: TextBuffer, P: Parser, R: Renderer> Engine<B, P, R> {
	/// Creates an engine in plain-text mode.
	///
	/// Fails if the configured keymap does not parse.
	pub fn new(mut buffer: B, parser: P, renderer: R, config: EngineConfig) -> Result<Self> {
		let keymap = Keymap::from_config(&config.keymap)?;
		buffer.set_mode_class(&Mode::Off.class_name());
		Ok(Self {
			buffer,
			parser,
			renderer,
			config,
			keymap,
			mode: Mode::Off,
			tree: None,
			generation: 0,
			elements: Elements::default(),
			focus: None,
			edit: None,
			next_session: 0,
			invalid_edit: false,
			quarantine: Quarantine::Idle,
			next_quarantine: 0,
			drag: None,
			hover: None,
			pre_insert: None,
			post_insert: None,
			clipboard: Box::new(MemoryClipboard::default()),
			transfer: None,
			deferred: DeferredQueue::default(),
			own_marks: FxHashSet::default(),
		})
	}

	/// Replaces the native copy mechanism.
	pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
		self.clipboard = Box::new(clipboard);
		self
	}

	pub fn buffer(&self) -> &B {
		&self.buffer
	}

	/// Direct buffer access. Call [`sync`](Self::sync) after editing.
	pub fn buffer_mut(&mut self) -> &mut B {
		&mut self.buffer
	}

	pub fn parser(&self) -> &P {
		&self.parser
	}

	pub fn renderer(&self) -> &R {
		&self.renderer
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn keymap_mut(&mut self) -> &mut Keymap {
		&mut self.keymap
	}

	pub fn mode(&self) -> &Mode {
		&self.mode
	}

	pub fn is_active(&self) -> bool {
		self.mode.is_active()
	}

	/// The current tree; `None` while block mode is off.
	pub fn tree(&self) -> Option<&Tree> {
		self.tree.as_ref()
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn elements(&self) -> &Elements {
		&self.elements
	}

	/// The element bound to `id`, including the provisional node's.
	pub fn element(&self, id: NodeId) -> Option<&Element> {
		if id == PROVISIONAL_NODE {
			return self.quarantine.provisional().map(|p| &p.element);
		}
		self.elements.get(id)
	}

	fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
		if id == PROVISIONAL_NODE {
			return self.quarantine.provisional_mut().map(|p| &mut p.element);
		}
		self.elements.get_mut(id)
	}

	/// Switches between plain text and block modes.
	///
	/// Switching to the current mode does nothing. On failure the previous
	/// mode stays in effect.
	pub fn set_mode(&mut self, target: Mode) -> Result<()> {
		if target == self.mode {
			return Ok(());
		}
		let previous = std::mem::replace(&mut self.mode, target);
		debug!(from = %previous, to = %self.mode, "switching mode");

		let result = match (previous.is_active(), self.mode.is_active()) {
			(_, false) => {
				self.teardown();
				Ok(())
			}
			(false, true) => self.rerender(),
			(true, true) => self.transition(),
		};
		if let Err(err) = result {
			self.mode = previous;
			return Err(err);
		}
		self.buffer.set_mode_class(&self.mode.class_name());
		Ok(())
	}

	/// Enters the block mode named in the config.
	pub fn activate(&mut self) -> Result<()> {
		self.set_mode(self.config.block_mode())
	}

	fn transition(&mut self) -> Result<()> {
		let snapshot = match &self.tree {
			Some(tree) => Some(self.renderer.prepare_transition(tree, &self.elements)),
			None => None,
		};
		self.rerender()?;
		if let (Some(snapshot), Some(tree)) = (snapshot, &self.tree) {
			self.renderer.render_transition(snapshot, tree, &mut self.elements);
		}
		Ok(())
	}

	fn teardown(&mut self) {
		self.abandon_provisional();
		self.edit = None;
		self.invalid_edit = false;
		self.tree = None;
		self.elements.clear();
		self.focus = None;
		self.drag = None;
		self.hover = None;
		self.transfer = None;
		self.deferred.take_all();
		self.buffer.take_changes();
	}

	/// Parses the whole buffer and rebuilds every element.
	///
	/// A parse failure leaves the previous tree in place. Selection and an
	/// in-progress edit carry over to a node with the same range and kind.
	pub fn rerender(&mut self) -> Result<()> {
		let text = self.buffer.text();
		let tree = self.parser.parse(&text)?;

		let focused = self.focus.and_then(|id| self.node_key(id));
		let editing = match self.edit.as_ref().map(|s| s.target) {
			Some(EditTarget::Node(id)) => self.node_key(id),
			_ => None,
		};

		self.generation += 1;
		self.elements.clear();
		for &root in tree.roots() {
			if let Some(node) = tree.get(root) {
				self.renderer.render(node, &tree, &self.buffer, &mut self.elements, &self.config.render);
			}
		}
		debug!(generation = self.generation, nodes = tree.len(), "re-rendered");
		self.tree = Some(tree);
		self.hover = None;

		let focus = focused.and_then(|key| self.find_node(key));
		self.focus = None;
		self.set_focus(focus);
		self.rebind_session(editing);
		self.refresh_provisional();
		Ok(())
	}

	/// Drains buffer change notifications, re-rendering if any arrived while
	/// a block mode is active. Returns true if it re-rendered.
	pub fn sync(&mut self) -> Result<bool> {
		let changes = self.buffer.take_changes();
		if changes.is_empty() || !self.mode.is_active() {
			return Ok(false);
		}
		trace!(changes = changes.len(), version = self.buffer.version(), "buffer changed");
		self.rerender()?;
		Ok(true)
	}

	/// Reverts the buffer's last change and re-renders.
	pub fn undo(&mut self) -> Result<bool> {
		if !self.buffer.undo() {
			return Ok(false);
		}
		self.sync()?;
		Ok(true)
	}

	pub fn redo(&mut self) -> Result<bool> {
		if !self.buffer.redo() {
			return Ok(false);
		}
		self.sync()?;
		Ok(true)
	}

	/// Runs deferred tasks due at `now`.
	pub fn tick(&mut self, now: Instant) {
		for task in self.deferred.take_due(now) {
			self.run_task(task);
		}
	}

	/// Runs every deferred task immediately.
	pub fn flush_deferred(&mut self) {
		for task in self.deferred.take_all() {
			self.run_task(task);
		}
	}

	/// Number of deferred tasks waiting to run.
	pub fn pending_tasks(&self) -> usize {
		self.deferred.len()
	}

	/// When the next deferred task is due.
	pub fn next_due(&self) -> Option<Instant> {
		self.deferred.next_due()
	}

	fn schedule(&mut self, task: Task, delay: Duration) {
		self.deferred.schedule(task, Instant::now(), delay);
	}

	fn run_task(&mut self, task: Task) {
		trace!(?task, "running deferred task");
		match task {
			Task::EnterEdit { seq } => self.enter_provisional_edit(seq),
			Task::RefocusEdit { session } => self.refocus_edit(session),
			Task::Refocus { node, generation } => {
				if generation != self.generation || self.select(node).is_err() {
					trace!(%node, generation, "dropping stale refocus");
				}
			}
			Task::ReleaseTransfer => self.transfer = None,
		}
	}

	/// Parses the document as it would read with `range` replaced by
	/// `text`, without touching the buffer.
	fn check_splice(&self, range: Range, text: &str) -> std::result::Result<(), ParseError> {
		let mut doc = self.buffer.slice(Range::new(Position::ZERO, range.from));
		doc.push_str(text);
		doc.push_str(&self.buffer.slice(Range::new(range.to, self.buffer.end())));
		self.parser.parse(&doc).map(drop)
	}

	fn tree_ref(&self) -> Result<&Tree> {
		self.tree.as_ref().ok_or(EngineError::Inactive)
	}

	fn node_range(&self, id: NodeId) -> Result<Range> {
		self.tree_ref()?.get(id).map(|n| n.range).ok_or(EngineError::StaleNode(id))
	}

	fn is_editable(&self, id: NodeId) -> bool {
		self.tree.as_ref().and_then(|t| t.get(id)).is_some_and(|n| n.kind.is_editable())
	}

	fn node_key(&self, id: NodeId) -> Option<(Range, NodeKind)> {
		let node = self.tree.as_ref()?.get(id)?;
		Some((node.range, node.kind))
	}

	fn find_node(&self, (range, kind): (Range, NodeKind)) -> Option<NodeId> {
		self.tree
			.as_ref()?
			.nodes()
			.find(|n| n.range == range && n.kind == kind)
			.map(|n| n.id)
	}

	/// Selects the innermost node spanning exactly `range`, or nothing.
	fn focus_range(&mut self, range: Range) {
		let found = self.tree.as_ref().and_then(|tree| {
			tree.preorder()
				.into_iter()
				.rev()
				.find(|&id| tree.get(id).is_some_and(|n| n.range == range))
		});
		match found {
			Some(id) => {
				if let Err(err) = self.select(id) {
					trace!(error = %err, "could not refocus");
				}
			}
			None => self.set_focus(None),
		}
	}

	fn set_focus(&mut self, focus: Option<NodeId>) {
		if let Some(old) = self.focus
			&& let Some(el) = self.elements.get_mut(old)
		{
			el.remove_class(class::SELECTED);
		}
		self.focus = focus;
		if let Some(new) = focus
			&& let Some(el) = self.elements.get_mut(new)
		{
			el.add_class(class::SELECTED);
		}
	}
}
