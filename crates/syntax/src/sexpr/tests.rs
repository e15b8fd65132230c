use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tessel_primitives::{Position, Range};

use super::*;
use crate::tree::NodeId;

fn pos(line: usize, column: usize) -> Position {
	Position::new(line, column)
}

/// Byte offset of `at` in `text`.
fn offset(text: &str, at: Position) -> usize {
	let mut line_start = 0;
	for _ in 0..at.line {
		line_start += text[line_start..].find('\n').map(|i| i + 1).unwrap_or(text.len() - line_start);
	}
	text[line_start..].char_indices().nth(at.column).map(|(i, _)| line_start + i).unwrap_or(text.len())
}

fn slice(text: &str, range: Range) -> &str {
	&text[offset(text, range.from)..offset(text, range.to)]
}

#[test]
fn parses_nested_expression() {
	let tree = SexprParser.parse("(+ 1 2)").unwrap();
	assert_eq!(tree.roots().len(), 1);
	let root = tree.roots()[0];
	assert_eq!(tree.get(root).unwrap().kind, NodeKind::Expression);

	let kids: Vec<_> = tree.children(root).iter().map(|id| tree.get(*id).unwrap().range).collect();
	assert_eq!(kids, vec![Range::new(pos(0, 1), pos(0, 2)), Range::new(pos(0, 3), pos(0, 4)), Range::new(pos(0, 5), pos(0, 6))]);
}

#[test]
fn tracks_lines_and_node_kinds() {
	let text = "; header\n(define x ...)\n\"s t\"";
	let tree = SexprParser.parse(text).unwrap();
	let kinds: Vec<_> = tree.preorder().into_iter().map(|id| tree.get(id).unwrap().kind).collect();
	assert_eq!(
		kinds,
		vec![
			NodeKind::Comment,
			NodeKind::Expression,
			NodeKind::Literal,
			NodeKind::Literal,
			NodeKind::Blank,
			NodeKind::Literal,
		]
	);
	let string = tree.get(NodeId(5)).unwrap();
	assert_eq!(string.range, Range::new(pos(2, 0), pos(2, 5)));
	assert_eq!(slice(text, string.range), "\"s t\"");
}

#[test]
fn carriage_returns_break_lines() {
	let ranges = |text: &str| -> Vec<Range> {
		let tree = SexprParser.parse(text).unwrap();
		tree.preorder().into_iter().map(|id| tree.get(id).unwrap().range).collect()
	};
	let lone = ranges("(a)\r(b)");
	assert_eq!(lone[3], Range::new(pos(1, 1), pos(1, 2)));
	let pair = ranges("(a)\r\n(b)");
	assert_eq!(pair[3], Range::new(pos(1, 1), pos(1, 2)));

	let commented = ranges("; c\rx");
	assert_eq!(commented, vec![Range::new(pos(0, 0), pos(0, 3)), Range::new(pos(1, 0), pos(1, 1))]);
}

#[test]
fn reports_structural_errors() {
	let err = SexprParser.parse("(a (b)").unwrap_err();
	assert_eq!(err.kind, ParseErrorKind::Unclosed('('));
	assert_eq!(err.at, pos(0, 0));

	let err = SexprParser.parse("a)").unwrap_err();
	assert_eq!(err, ParseError::new(ParseErrorKind::UnexpectedCloser(')'), pos(0, 1)));

	let err = SexprParser.parse("\n  \"abc").unwrap_err();
	assert_eq!(err, ParseError::new(ParseErrorKind::UnterminatedString, pos(1, 2)));
}

#[test]
fn lex_accepts_exactly_one_literal() {
	assert!(SexprParser.lex("42").is_ok());
	assert!(SexprParser.lex("\"two words\"").is_ok());
	assert!(SexprParser.lex("...").is_ok());
	assert_eq!(SexprParser.lex("").unwrap_err().kind, ParseErrorKind::Empty);
	assert_eq!(SexprParser.lex("a b").unwrap_err().kind, ParseErrorKind::NotALiteral);
	assert_eq!(SexprParser.lex("(a)").unwrap_err().kind, ParseErrorKind::NotALiteral);
	assert_eq!(SexprParser.lex("a)").unwrap_err().kind, ParseErrorKind::NotALiteral);
	assert_eq!(SexprParser.lex("\"open").unwrap_err().kind, ParseErrorKind::UnterminatedString);
}

#[test]
fn error_messages_are_one_based() {
	let err = SexprParser.parse("(a").unwrap_err();
	assert_eq!(SexprParser.error_message(&err).unwrap(), "'(' opened at line 1, column 1 is never closed");
}

#[test]
fn tree_errors_have_no_message() {
	let err = ParseError::from(crate::tree::TreeError::Unbalanced(pos(0, 0)));
	assert!(SexprParser.error_message(&err).is_err());
}

fn arb_sexpr() -> impl Strategy<Value = String> {
	let leaf = prop_oneof!["[a-z0-9+*<>=-]{1,5}", Just("...".to_string()), "\"[a-z ]{0,4}\""];
	leaf.prop_recursive(4, 32, 5, |inner| {
		(prop::collection::vec(inner, 0..5), prop_oneof![Just(" "), Just("\n  ")])
			.prop_map(|(items, sep)| format!("({})", items.join(sep)))
	})
}

proptest! {
	/// Root ranges plus the gaps between them reproduce the source exactly.
	#[test]
	fn prop_roots_and_gaps_reconstruct_text(
		forms in prop::collection::vec(arb_sexpr(), 0..4),
		gap in prop_oneof![Just(" "), Just("\n"), Just("  ;note\n")],
	) {
		let text = forms.join(gap);
		let tree = SexprParser.parse(&text).unwrap();

		let mut rebuilt = String::new();
		let mut cursor = Position::ZERO;
		for &root in tree.roots() {
			let range = tree.get(root).unwrap().range;
			prop_assert!(cursor <= range.from);
			rebuilt.push_str(slice(&text, Range::new(cursor, range.from)));
			rebuilt.push_str(slice(&text, range));
			cursor = range.to;
		}
		rebuilt.push_str(&text[offset(&text, cursor)..]);
		prop_assert_eq!(rebuilt, text);
	}

	/// Children always nest inside their parent.
	#[test]
	fn prop_children_nest(form in arb_sexpr()) {
		let tree = SexprParser.parse(&form).unwrap();
		for node in tree.nodes() {
			for child in &node.children {
				let child = tree.get(*child).unwrap();
				prop_assert!(node.range.contains_range(&child.range));
				prop_assert_eq!(child.parent, Some(node.id));
			}
		}
	}
}
