//! A renderer producing plain elements and an indented text outline.

use std::fmt::Write;

use rustc_hash::FxHashMap;
use tessel_buffer::TextBuffer;
use tessel_primitives::Range;
use tessel_syntax::{Node, NodeKind, Tree};
use tracing::{debug, trace};

use super::{Renderer, kind_class};
use crate::config::RenderOptions;
use crate::elements::{Anchor, Element, Elements, class};

/// Element placement captured before a transition: range to depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineSnapshot {
	placements: FxHashMap<Range, usize>,
}

impl OutlineSnapshot {
	pub fn len(&self) -> usize {
		self.placements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.placements.is_empty()
	}
}

/// How elements moved across the last transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionStats {
	/// Elements found at the same range and depth.
	pub kept: usize,
	/// Elements found at the same range but a different depth.
	pub moved: usize,
	/// Elements with no counterpart in the snapshot.
	pub entered: usize,
	/// Snapshot entries with no element after the render.
	pub exited: usize,
}

/// Attaches one element per node and records transition statistics.
#[derive(Debug, Default)]
pub struct OutlineRenderer {
	last_transition: Option<TransitionStats>,
}

impl OutlineRenderer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Statistics of the most recent transition, if any ran.
	pub fn last_transition(&self) -> Option<TransitionStats> {
		self.last_transition
	}

	fn render_at(
		&mut self,
		node: &Node,
		depth: usize,
		tree: &Tree,
		buffer: &dyn TextBuffer,
		elements: &mut Elements,
		options: &RenderOptions,
	) {
		let text = match node.kind {
			NodeKind::Expression => String::new(),
			_ => buffer.slice(node.range),
		};
		let mut element = Element::new(node.id, Anchor::Range(node.range), text);
		element.add_class(class::BLOCK);
		element.add_class(kind_class(node.kind));
		element.depth = depth;
		element.hidden = node.kind == NodeKind::Comment && !options.show_comments;
		element.drop_target = node.kind == NodeKind::Expression;
		if element.drop_target {
			element.add_class(class::DROP_TARGET);
		}
		elements.attach(element);

		for &child in &node.children {
			if let Some(child) = tree.get(child) {
				self.render_at(child, depth + 1, tree, buffer, elements, options);
			}
		}
	}
}

impl Renderer for OutlineRenderer {
	type Snapshot = OutlineSnapshot;

	fn render(
		&mut self,
		node: &Node,
		tree: &Tree,
		buffer: &dyn TextBuffer,
		elements: &mut Elements,
		options: &RenderOptions,
	) {
		trace!(node = %node.id, kind = %node.kind, "render");
		self.render_at(node, 0, tree, buffer, elements, options);
	}

	fn prepare_transition(&mut self, tree: &Tree, elements: &Elements) -> OutlineSnapshot {
		let placements = tree
			.nodes()
			.filter_map(|node| elements.get(node.id).map(|el| (node.range, el.depth)))
			.collect();
		OutlineSnapshot { placements }
	}

	fn render_transition(&mut self, mut snapshot: OutlineSnapshot, tree: &Tree, elements: &mut Elements) {
		let mut stats = TransitionStats::default();
		for node in tree.nodes() {
			let Some(el) = elements.get(node.id) else {
				continue;
			};
			match snapshot.placements.remove(&node.range) {
				Some(depth) if depth == el.depth => stats.kept += 1,
				Some(_) => stats.moved += 1,
				None => stats.entered += 1,
			}
		}
		stats.exited = snapshot.placements.len();
		debug!(?stats, "transition rendered");
		self.last_transition = Some(stats);
	}
}

/// Formats the visible elements of `tree` as an indented outline, one node
/// per line in document order.
pub fn outline(tree: &Tree, elements: &Elements, options: &RenderOptions) -> String {
	let mut out = String::new();
	for id in tree.preorder() {
		let (Some(node), Some(el)) = (tree.get(id), elements.get(id)) else {
			continue;
		};
		if el.hidden {
			continue;
		}
		let indent = el.depth * options.indent;
		let _ = write!(out, "{:indent$}{} {}", "", node.kind, node.range);
		if !el.text.is_empty() {
			let _ = write!(out, " {:?}", el.text);
		}
		out.push('\n');
	}
	out
}
