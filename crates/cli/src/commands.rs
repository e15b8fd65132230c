//! Subcommand bodies, kept free of I/O so they can be tested on strings.

use anyhow::{Context, Result, bail};
use tessel_buffer::{RopeBuffer, TextBuffer};
use tessel_engine::render::outline;
use tessel_engine::{DropEvent, DropOutcome, Engine, EngineConfig, OutlineRenderer};
use tessel_primitives::Position;
use tessel_syntax::{Parser, SexprParser};
use tracing::debug;

#[cfg(test)]
mod tests;

pub type BlockEngine = Engine<RopeBuffer, SexprParser, OutlineRenderer>;

/// Opens `src` in block mode.
pub fn open(src: &str, config: EngineConfig) -> Result<BlockEngine> {
	let mut engine = Engine::new(RopeBuffer::new(src), SexprParser::new(), OutlineRenderer::new(), config)?;
	engine.activate().context("document does not parse")?;
	debug!(generation = engine.generation(), nodes = engine.elements().len(), "document opened");
	Ok(engine)
}

pub fn render_outline(src: &str, config: EngineConfig) -> Result<String> {
	let engine = open(src, config)?;
	let tree = engine.tree().context("no tree after activation")?;
	Ok(outline(tree, engine.elements(), &engine.config().render))
}

/// Parses `src`. Returns the node count, or the parser's message for the
/// first error.
pub fn check(src: &str) -> std::result::Result<usize, String> {
	let parser = SexprParser::new();
	match parser.parse(src) {
		Ok(tree) => Ok(tree.len()),
		Err(err) => Err(parser.error_message(&err).unwrap_or_else(|_| err.to_string())),
	}
}

/// Deletes the innermost node containing `at` and returns the new text.
pub fn delete(src: &str, at: Position, config: EngineConfig) -> Result<String> {
	let mut engine = open(src, config)?;
	let id = engine.tree().and_then(|tree| tree.node_at(at)).with_context(|| format!("no block at {}", human(at)))?;
	engine.delete_node(id)?;
	Ok(engine.buffer().text())
}

/// Drags the innermost node containing `from` onto whatever lies at `to`.
pub fn relocate(src: &str, from: Position, to: Position, config: EngineConfig) -> Result<(String, DropOutcome)> {
	let mut engine = open(src, config)?;
	let Some(tree) = engine.tree() else {
		bail!("no tree after activation");
	};
	let Some(source) = tree.node_at(from) else {
		bail!("no block at {}", human(from));
	};
	let event = match tree.node_at(to) {
		Some(target) => DropEvent::on_node(target, to),
		None => DropEvent::at(to),
	};
	engine.drag_start(source)?;
	let outcome = engine.drop_at(event)?;
	Ok((engine.buffer().text(), outcome))
}

/// One-based `LINE:COL`, as accepted on the command line.
pub fn human(at: Position) -> String {
	format!("{}:{}", at.line + 1, at.column + 1)
}
