use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tessel_primitives::Position;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "tessel")]
#[command(about = "Inspect and edit source files as block trees")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Increase log verbosity (-v debug, -vv trace)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Engine configuration file (TOML)
	#[arg(long, short = 'c', value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the block outline of a file
	Outline {
		/// File to read.
		file: PathBuf,
	},
	/// Parse a file and report the first error
	Check {
		/// File to read.
		file: PathBuf,
	},
	/// Delete the innermost block at a position and print the result
	Delete {
		/// File to read. It is not written back.
		file: PathBuf,
		/// One-based LINE:COL inside the block.
		#[arg(long, value_parser = parse_at)]
		at: Position,
	},
	/// Drag the block at one position and drop it at another
	Move {
		/// File to read. It is not written back.
		file: PathBuf,
		/// One-based LINE:COL inside the block to move.
		#[arg(long, value_parser = parse_at)]
		from: Position,
		/// One-based LINE:COL of the drop point.
		#[arg(long, value_parser = parse_at)]
		to: Position,
	},
}

/// Parses a one-based `LINE:COL` pair into a zero-based position.
pub fn parse_at(s: &str) -> Result<Position, String> {
	let (line, column) = s.split_once(':').ok_or_else(|| format!("expected LINE:COL, got {s:?}"))?;
	let line: usize = line.trim().parse().map_err(|_| format!("invalid line {line:?}"))?;
	let column: usize = column.trim().parse().map_err(|_| format!("invalid column {column:?}"))?;
	if line == 0 || column == 0 {
		return Err("line and column start at 1".to_string());
	}
	Ok(Position::new(line - 1, column - 1))
}
