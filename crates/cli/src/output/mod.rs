//! Rendering the result vector.
//!
//! `json` prints one pretty array, `ndjson` one record per line, `toon` the
//! token-efficient encoding of the same array and `text` a colored summary
//! for humans.


use std::fmt::Write as _;
use std::io::{self, Write};

use colored::Colorize;
use runjs::ExecutionResult;

use crate::error::{CliError, Result};

/// Output format for the result vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// TOON output (token-efficient for LLMs)
	Toon,
	/// JSON array (default)
	#[default]
	Json,
	/// Newline-delimited JSON, one record per target
	Ndjson,
	/// Human-readable text
	Text,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Toon => write!(f, "toon"),
			OutputFormat::Json => write!(f, "json"),
			OutputFormat::Ndjson => write!(f, "ndjson"),
			OutputFormat::Text => write!(f, "text"),
		}
	}
}

fn json_err(e: serde_json::Error) -> CliError {
	CliError::Output(e.to_string())
}

/// Renders `results` in `format`, without a trailing newline.
pub fn render(results: &[ExecutionResult], format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Json => serde_json::to_string_pretty(results).map_err(json_err),
		OutputFormat::Ndjson => {
			let lines = results
				.iter()
				.map(serde_json::to_string)
				.collect::<std::result::Result<Vec<_>, _>>()
				.map_err(json_err)?;
			Ok(lines.join("\n"))
		}
		OutputFormat::Toon => {
			let value = serde_json::to_value(results).map_err(json_err)?;
			Ok(toon::encode(&value, None))
		}
		OutputFormat::Text => Ok(render_text(results)),
	}
}

fn render_text(results: &[ExecutionResult]) -> String {
	let mut out = String::new();
	for result in results {
		let status = if result.is_ok() { "ok".green().bold() } else { "failed".red().bold() };
		let _ = write!(out, "{status} {} ({})", result.target.bold(), result.provider);
		if let Some(title) = &result.title {
			let _ = write!(out, " {}", format!("\"{title}\"").dimmed());
		}
		out.push('\n');
		if let Some(value) = &result.result {
			let _ = writeln!(out, "  {} {value}", "=>".cyan());
		}
		if let Some(error) = &result.error {
			let _ = writeln!(out, "  {} {error}", "error:".red());
		}
	}
	let failed = results.iter().filter(|r| !r.is_ok()).count();
	let _ = write!(out, "{} targets, {} failed", results.len(), failed);
	out
}

/// Writes the rendered results to stdout.
pub fn print_results(results: &[ExecutionResult], format: OutputFormat) -> Result<()> {
	let rendered = render(results, format)?;
	let mut stdout = io::stdout().lock();
	if !rendered.is_empty() {
		writeln!(stdout, "{rendered}").map_err(|e| CliError::Output(e.to_string()))?;
	}
	stdout.flush().map_err(|e| CliError::Output(e.to_string()))
}

/// Prints a fatal error to stderr.
pub fn print_error(err: &CliError) {
	eprintln!("{} {err}", "error:".red().bold());
}
