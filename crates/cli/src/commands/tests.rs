use pretty_assertions::assert_eq;
use tessel_engine::DropRejection;
use tessel_primitives::Range;

use super::*;

fn pos(line: usize, column: usize) -> Position {
	Position::new(line, column)
}

#[test]
fn outline_lists_nested_blocks() {
	let out = render_outline("(+ 1 2)", EngineConfig::default()).unwrap();
	let lines: Vec<&str> = out.lines().collect();
	assert_eq!(lines[0], "expression 0:0..0:7");
	assert_eq!(lines[1], "  literal 0:1..0:2 \"+\"");
	assert_eq!(lines.len(), 4);
}

#[test]
fn outline_honours_indent_setting() {
	let config = EngineConfig::from_toml("[render]\nindent = 4\n").unwrap();
	let out = render_outline("(a)", config).unwrap();
	assert!(out.contains("\n    literal 0:1..0:2 \"a\""));
}

#[test]
fn check_reports_node_count_or_message() {
	assert_eq!(check("(a b) c"), Ok(4));
	let message = check("(a b").unwrap_err();
	assert!(!message.is_empty());
}

#[test]
fn open_fails_on_unparsable_text() {
	assert!(open("(a", EngineConfig::default()).is_err());
}

#[test]
fn delete_removes_innermost_block() {
	let text = delete("(+ 1 2)", pos(0, 3), EngineConfig::default()).unwrap();
	assert_eq!(text, "(+  2)");
}

#[test]
fn delete_outside_any_block_fails() {
	let err = delete("(a)  (b)", pos(0, 4), EngineConfig::default()).unwrap_err();
	assert_eq!(err.to_string(), "no block at 1:5");
}

#[test]
fn relocate_replaces_a_literal() {
	let (text, outcome) = relocate("(f a b)", pos(0, 3), pos(0, 5), EngineConfig::default()).unwrap();
	assert_eq!(text, "(f  a)");
	assert_eq!(outcome, DropOutcome::Moved(Range::new(pos(0, 4), pos(0, 5))));
}

#[test]
fn relocate_onto_itself_is_ignored() {
	let (text, outcome) = relocate("(f a)", pos(0, 3), pos(0, 3), EngineConfig::default()).unwrap();
	assert_eq!(text, "(f a)");
	assert_eq!(outcome, DropOutcome::Ignored(DropRejection::NoOp));
}
