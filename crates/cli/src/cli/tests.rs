use clap::Parser;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn parse_at_is_one_based() {
	assert_eq!(parse_at("1:1"), Ok(Position::new(0, 0)));
	assert_eq!(parse_at("3:12"), Ok(Position::new(2, 11)));
}

#[test]
fn parse_at_rejects_malformed_input() {
	assert!(parse_at("12").is_err());
	assert!(parse_at("a:1").is_err());
	assert!(parse_at("1:").is_err());
	assert!(parse_at("0:4").is_err());
}

#[test]
fn verbosity_counts_and_is_global() {
	let cli = Cli::try_parse_from(["tessel", "outline", "a.scm", "-vv"]).unwrap();
	assert_eq!(cli.verbose, 2);
	assert!(matches!(cli.command, Command::Outline { .. }));
}

#[test]
fn move_takes_both_positions() {
	let cli = Cli::try_parse_from(["tessel", "move", "a.scm", "--from", "1:2", "--to", "2:1"]).unwrap();
	match cli.command {
		Command::Move { from, to, .. } => {
			assert_eq!(from, Position::new(0, 1));
			assert_eq!(to, Position::new(1, 0));
		}
		other => panic!("unexpected command {other:?}"),
	}
}

#[test]
fn delete_requires_a_position() {
	assert!(Cli::try_parse_from(["tessel", "delete", "a.scm"]).is_err());
}
