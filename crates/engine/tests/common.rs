//! Shared helpers for engine integration tests.

#![allow(dead_code)]

use tessel_buffer::{RopeBuffer, TextBuffer};
use tessel_engine::{Engine, EngineConfig, OutlineRenderer};
use tessel_primitives::{Position, Range};
use tessel_syntax::{NodeId, SexprParser};

pub type TestEngine = Engine<RopeBuffer, SexprParser, OutlineRenderer>;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::TRACE)
		.try_init();
}

pub fn engine_with(text: &str, config: EngineConfig) -> TestEngine {
	init_tracing();
	let mut engine = Engine::new(RopeBuffer::new(text), SexprParser, OutlineRenderer::new(), config).unwrap();
	engine.activate().unwrap();
	engine
}

pub fn engine(text: &str) -> TestEngine {
	engine_with(text, EngineConfig::default())
}

/// The innermost node covering exactly `range`.
pub fn node_spanning(engine: &TestEngine, range: Range) -> NodeId {
	let tree = engine.tree().unwrap();
	tree.preorder()
		.into_iter()
		.rev()
		.find(|&id| tree.get(id).unwrap().range == range)
		.unwrap_or_else(|| panic!("no node spans {range}"))
}

/// The innermost node whose text is `text`.
pub fn node(engine: &TestEngine, text: &str) -> NodeId {
	let tree = engine.tree().unwrap();
	tree.preorder()
		.into_iter()
		.rev()
		.find(|&id| engine.buffer().slice(tree.get(id).unwrap().range) == text)
		.unwrap_or_else(|| panic!("no node spells {text:?}"))
}

/// Column spans of space-separated words on one line.
pub fn word_spans(words: &[String]) -> Vec<(usize, usize)> {
	let mut at = 0;
	words
		.iter()
		.map(|w| {
			let span = (at, at + w.len());
			at = span.1 + 1;
			span
		})
		.collect()
}

pub fn line_range((from, to): (usize, usize)) -> Range {
	Range::new(Position::new(0, from), Position::new(0, to))
}

/// Applies column-addressed replacements against the original text all at
/// once.
pub fn splice(text: &str, mut edits: Vec<((usize, usize), String)>) -> String {
	edits.sort_by_key(|((from, to), _)| (*from, *to));
	let mut out = String::new();
	let mut at = 0;
	for ((from, to), replacement) in edits {
		out.push_str(&text[at..from]);
		out.push_str(&replacement);
		at = to;
	}
	out.push_str(&text[at..]);
	out
}
