//! Tessel command-line entry point.

mod cli;
mod commands;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tessel_engine::{DropOutcome, EngineConfig};
use tracing::{info, warn};

fn main() -> Result<ExitCode> {
	let cli = Cli::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(match cli.verbose {
			0 => tracing::Level::INFO,
			1 => tracing::Level::DEBUG,
			_ => tracing::Level::TRACE,
		})
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let config = load_config(cli.config.as_deref())?;

	match cli.command {
		Command::Outline { file } => {
			let src = read(&file)?;
			print!("{}", commands::render_outline(&src, config)?);
		}
		Command::Check { file } => {
			let src = read(&file)?;
			match commands::check(&src) {
				Ok(nodes) => info!(file = %file.display(), nodes, "ok"),
				Err(message) => {
					eprintln!("{}: {message}", file.display());
					return Ok(ExitCode::FAILURE);
				}
			}
		}
		Command::Delete { file, at } => {
			let src = read(&file)?;
			print!("{}", commands::delete(&src, at, config)?);
		}
		Command::Move { file, from, to } => {
			let src = read(&file)?;
			let (text, outcome) = commands::relocate(&src, from, to, config)?;
			if let DropOutcome::Ignored(reason) = outcome {
				warn!(?reason, from = %commands::human(from), to = %commands::human(to), "nothing moved");
			}
			print!("{text}");
		}
	}
	Ok(ExitCode::SUCCESS)
}

fn read(path: &Path) -> Result<String> {
	std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
	let Some(path) = path else {
		return Ok(EngineConfig::default());
	};
	let src = read(path)?;
	let config = EngineConfig::from_toml(&src).with_context(|| format!("invalid config {}", path.display()))?;
	info!(path = %path.display(), mode = %config.mode, "config loaded");
	Ok(config)
}
