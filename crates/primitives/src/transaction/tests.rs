use proptest::prelude::*;

use super::{Bias, Change, ChangeSet};
use crate::Rope;

#[test]
fn replace_applies_in_place() {
	let mut doc = Rope::from("(+ 1 2)");
	let cs = ChangeSet::replace(doc.len_chars(), 3, 4, "10");
	cs.apply(&mut doc);
	assert_eq!(doc.to_string(), "(+ 10 2)");
	assert_eq!(cs.len(), 7);
	assert_eq!(cs.len_after(), 8);
}

#[test]
fn empty_replacement_is_deletion() {
	let mut doc = Rope::from("hello world");
	ChangeSet::replace(doc.len_chars(), 5, 11, "").apply(&mut doc);
	assert_eq!(doc.to_string(), "hello");
}

#[test]
fn identity_changeset() {
	let cs = ChangeSet::replace(4, 2, 2, "");
	assert!(cs.is_identity());
	assert!(!ChangeSet::replace(4, 2, 2, "x").is_identity());
}

#[test]
fn multiple_changes_use_original_offsets() {
	let mut doc = Rope::from("aaa bbb ccc");
	let cs = ChangeSet::from_changes(
		doc.len_chars(),
		[
			Change {
				start: 0,
				end: 3,
				replacement: None,
			},
			Change {
				start: 8,
				end: 11,
				replacement: Some("aaa".into()),
			},
		],
	);
	cs.apply(&mut doc);
	assert_eq!(doc.to_string(), " bbb aaa");
}

#[test]
fn map_pos_bias_at_insertion_point() {
	let cs = ChangeSet::replace(5, 2, 2, "xyz");
	assert_eq!(cs.map_pos(2, Bias::Left), 2);
	assert_eq!(cs.map_pos(2, Bias::Right), 5);
	assert_eq!(cs.map_pos(1, Bias::Right), 1);
	assert_eq!(cs.map_pos(4, Bias::Left), 7);
}

#[test]
fn map_pos_collapses_deleted_text() {
	let cs = ChangeSet::replace(10, 2, 6, "");
	assert_eq!(cs.map_pos(4, Bias::Right), 2);
	assert_eq!(cs.map_pos(6, Bias::Right), 2);
	assert_eq!(cs.map_pos(9, Bias::Right), 5);
}

#[test]
fn map_pos_at_document_end() {
	let cs = ChangeSet::replace(3, 3, 3, "!!");
	assert_eq!(cs.map_pos(3, Bias::Right), 5);
	assert_eq!(cs.map_pos(3, Bias::Left), 3);
}

fn arb_document() -> impl Strategy<Value = Rope> {
	"[ -~\n]{0,120}".prop_map(|s| Rope::from(s.as_str()))
}

fn arb_changes(doc_len: usize) -> impl Strategy<Value = Vec<Change>> {
	prop::collection::vec((0..=doc_len, 0..=6usize, proptest::option::of("[a-z ]{0,8}")), 0..5).prop_map(move |mut items| {
		items.sort_by_key(|(pos, _, _)| *pos);
		let mut changes = Vec::new();
		let mut last_end = 0;
		for (pos, delete_len, replacement) in items {
			let start = pos.max(last_end);
			if start > doc_len {
				break;
			}
			let end = (start + delete_len).min(doc_len);
			changes.push(Change { start, end, replacement });
			last_end = end;
		}
		changes
	})
}

proptest! {
	/// Applying a changeset and then its inverse restores the original text.
	#[test]
	fn prop_invert_roundtrip(doc in arb_document()) {
		let changes = arb_changes(doc.len_chars());
		proptest!(|(changes in changes)| {
			let original = doc.clone();
			let mut edited = doc.clone();
			let cs = ChangeSet::from_changes(original.len_chars(), changes);
			cs.apply(&mut edited);
			prop_assert_eq!(edited.len_chars(), cs.len_after());

			cs.invert(&original).apply(&mut edited);
			prop_assert_eq!(edited.to_string(), original.to_string());
		});
	}

	/// Mapped positions stay inside the edited document.
	#[test]
	fn prop_map_pos_in_bounds(doc in arb_document()) {
		let len = doc.len_chars();
		let changes = arb_changes(len);
		proptest!(|(changes in changes, pos in 0..=len)| {
			let cs = ChangeSet::from_changes(len, changes);
			prop_assert!(cs.map_pos(pos, Bias::Left) <= cs.len_after());
			prop_assert!(cs.map_pos(pos, Bias::Right) <= cs.len_after());
		});
	}
}
