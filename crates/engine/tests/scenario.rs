mod common;

use common::{engine, node};
use pretty_assertions::assert_eq;
use tessel_buffer::TextBuffer;
use tessel_engine::render::outline;
use tessel_engine::{DropEvent, DropOutcome, EditOutcome, KeyOutcome, Mode};
use tessel_primitives::{Key, KeyCode, Position, Range};
use tessel_syntax::{NodeKind, Parser, SexprParser};

#[test]
fn deleting_a_selected_argument() {
	let mut engine = engine("(+ 1 2)");
	let tree = engine.tree().unwrap();
	assert_eq!(tree.roots().len(), 1);
	let root = tree.roots()[0];
	assert_eq!(tree.children(root).len(), 3);

	let one = node(&engine, "1");
	engine.click(one).unwrap();
	assert_eq!(engine.handle_key(Key::new(KeyCode::Backspace)).unwrap(), KeyOutcome::Handled);

	assert_eq!(engine.buffer().text(), "(+  2)");
	assert!(SexprParser.parse("(+  2)").is_ok());
	let tree = engine.tree().unwrap();
	assert_eq!(tree.children(tree.roots()[0]).len(), 2);
}

#[test]
fn editing_session_end_to_end() {
	let mut engine = engine("(define x 1)\n(print x)");
	let one = node(&engine, "1");
	engine.double_click(one).unwrap();
	engine.input("4");
	engine.input("2");
	let committed = Range::new(Position::new(0, 10), Position::new(0, 12));
	assert_eq!(engine.blur().unwrap(), EditOutcome::Committed(committed));

	engine.buffer_mut().set_cursor(Position::new(1, 8));
	engine.input("y");
	engine.flush_deferred();
	engine.handle_key(Key::new(KeyCode::Enter)).unwrap();
	assert_eq!(engine.buffer().text(), "(define x 42)\n(print xy )");
}

#[test]
fn drag_between_lines() {
	let mut engine = engine("(a b)\n(c)");
	engine.drag_start(node(&engine, "b")).unwrap();
	engine.set_pre_insert_hook(|text, _| format!(" {text}"));
	let outcome = engine.drop_at(DropEvent::at(Position::new(1, 2))).unwrap();
	assert!(matches!(outcome, DropOutcome::Moved(_)));
	assert_eq!(engine.buffer().text(), "(a )\n(c b)");
	assert_eq!(engine.buffer().version(), 1);
}

#[test]
fn outline_after_mode_switch() {
	let mut engine = engine("(f a) ; note");
	engine.set_mode(Mode::blocks("compact")).unwrap();
	let tree = engine.tree().unwrap();
	let text = outline(tree, engine.elements(), &engine.config().render);
	assert_eq!(
		text,
		"expression 0:0..0:5\n  literal 0:1..0:2 \"f\"\n  literal 0:3..0:4 \"a\"\ncomment 0:6..0:12 \"; note\"\n"
	);
	assert!(tree.nodes().any(|n| n.kind == NodeKind::Comment));
}
