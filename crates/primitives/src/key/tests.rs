use super::*;

#[test]
fn parses_plain_and_named_keys() {
	assert_eq!("a".parse::<Key>().unwrap(), Key::char('a'));
	assert_eq!("tab".parse::<Key>().unwrap(), Key::new(KeyCode::Tab));
	assert_eq!("Backspace".parse::<Key>().unwrap(), Key::new(KeyCode::Backspace));
	assert_eq!("f5".parse::<Key>().unwrap(), Key::new(KeyCode::F(5)));
	assert_eq!("space".parse::<Key>().unwrap(), Key::char(' '));
}

#[test]
fn parses_modifier_prefixes() {
	assert_eq!("ctrl-z".parse::<Key>().unwrap(), Key::ctrl('z'));
	assert_eq!("shift-tab".parse::<Key>().unwrap(), Key::new(KeyCode::Tab).with_shift());

	let key: Key = "ctrl-alt-x".parse().unwrap();
	assert!(key.modifiers.ctrl);
	assert!(key.modifiers.alt);
	assert!(!key.modifiers.shift);
}

#[test]
fn parses_minus_key() {
	assert_eq!("-".parse::<Key>().unwrap(), Key::char('-'));
	assert_eq!("ctrl--".parse::<Key>().unwrap(), Key::ctrl('-'));
}

#[test]
fn rejects_unknown_parts() {
	assert_eq!("".parse::<Key>(), Err(KeyParseError::Empty));
	assert_eq!("hyper-a".parse::<Key>(), Err(KeyParseError::UnknownModifier("hyper".into())));
	assert_eq!("bogus".parse::<Key>(), Err(KeyParseError::UnknownKey("bogus".into())));
}

#[test]
fn display_round_trips_through_parse() {
	for desc in ["ctrl-z", "shift-tab", "backspace", "a", "f12", "alt-enter"] {
		let key: Key = desc.parse().unwrap();
		assert_eq!(key.to_string().parse::<Key>().unwrap(), key, "{desc}");
	}
}

#[test]
fn printable_ignores_command_chords() {
	assert_eq!(Key::char('x').printable(), Some('x'));
	assert_eq!(Key::char('X').with_shift().printable(), Some('X'));
	assert_eq!(Key::ctrl('x').printable(), None);
	assert_eq!(Key::new(KeyCode::Enter).printable(), None);
}
