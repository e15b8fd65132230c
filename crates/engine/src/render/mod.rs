//! The renderer contract: turns tree nodes into elements.

mod outline;

pub use outline::{OutlineRenderer, OutlineSnapshot, TransitionStats, outline};
use tessel_buffer::TextBuffer;
use tessel_syntax::{Node, NodeKind, Tree};

use crate::config::RenderOptions;
use crate::elements::{Anchor, Element, Elements, class};

/// Attaches elements for nodes and animates between renders.
pub trait Renderer {
	/// Element positions captured before a mode switch.
	type Snapshot;

	/// Attaches an element for `node` and, transitively, its children.
	fn render(
		&mut self,
		node: &Node,
		tree: &Tree,
		buffer: &dyn TextBuffer,
		elements: &mut Elements,
		options: &RenderOptions,
	);

	/// Builds the element for a provisional node, anchored to its bookmark.
	fn render_provisional(&mut self, node: &Node, text: &str) -> Element {
		let anchor = match node.quarantine {
			Some(bookmark) => Anchor::Bookmark(bookmark),
			None => Anchor::Range(node.range),
		};
		let mut element = Element::new(node.id, anchor, text);
		element.add_class(class::BLOCK);
		element.add_class(kind_class(node.kind));
		element
	}

	fn prepare_transition(&mut self, tree: &Tree, elements: &Elements) -> Self::Snapshot;

	fn render_transition(&mut self, snapshot: Self::Snapshot, tree: &Tree, elements: &mut Elements);
}

/// Class naming a node's kind.
pub fn kind_class(kind: NodeKind) -> &'static str {
	match kind {
		NodeKind::Literal => "tessel-literal",
		NodeKind::Blank => "tessel-blank",
		NodeKind::Whitespace => "tessel-whitespace",
		NodeKind::Comment => "tessel-comment",
		NodeKind::Expression => "tessel-expression",
	}
}
