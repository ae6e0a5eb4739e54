//! Turning flags, config files and stdin into run inputs.

use std::path::Path;
use std::time::Duration;

use runjs::{ExecutionMode, RunOptions};
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Parses `raw` as JSON, falling back to a plain string.
pub fn parse_arg(raw: &str) -> Value {
	serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// One target per line; blank lines and `#` comments are skipped.
pub fn parse_target_list(text: &str) -> Vec<String> {
	text.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.map(str::to_string)
		.collect()
}

fn read_file(path: &Path) -> Result<String> {
	std::fs::read_to_string(path).map_err(|source| CliError::Read {
		path: path.to_path_buf(),
		source,
	})
}

/// Reads [`RunOptions`] from a JSON file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<RunOptions> {
	let text = read_file(path)?;
	serde_json::from_str(&text).map_err(|source| CliError::ConfigFile {
		path: path.to_path_buf(),
		source,
	})
}

impl Cli {
	/// Config file values overridden by whatever flags were given.
	pub fn run_options(&self) -> Result<RunOptions> {
		let mut options = match &self.config {
			Some(path) => {
				debug!(target: "runjs.cli", path = %path.display(), "loading config");
				load_config(path)?
			}
			None => RunOptions::default(),
		};

		if let Some(browser) = &self.browser {
			options.provider = browser.clone();
		}
		if let Some(server) = &self.server {
			options.server = Some(server.clone());
		}
		if let Some(n) = self.concurrency {
			options.concurrency = n;
		}
		if self.asynchronous {
			options.mode = ExecutionMode::Async;
		}
		if let Some(secs) = self.script_timeout {
			options.script_timeout = Duration::from_secs(secs);
		}
		if !self.args.is_empty() {
			options.script_args = self.args.iter().map(|a| parse_arg(a)).collect();
		}
		if let Some(raw) = &self.browser_options {
			let blob: Value = serde_json::from_str(raw)
				.map_err(|e| CliError::Config(format!("--browser-options is not valid JSON: {e}")))?;
			options.provider_options = Some(blob);
		}
		Ok(options)
	}

	/// Positional targets followed by the target-list file, if any.
	pub fn all_targets(&self) -> Result<Vec<String>> {
		let mut targets = self.targets.clone();
		if let Some(path) = &self.target_list {
			targets.extend(parse_target_list(&read_file(path)?));
		}
		Ok(targets)
	}

	/// The script body from `--script` or stdin.
	pub async fn read_script(&self) -> Result<String> {
		match &self.script {
			Some(path) => tokio::fs::read_to_string(path).await.map_err(|source| CliError::Read {
				path: path.clone(),
				source,
			}),
			None => {
				let mut script = String::new();
				tokio::io::stdin()
					.read_to_string(&mut script)
					.await
					.map_err(CliError::Stdin)?;
				Ok(script)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use clap::Parser;
	use serde_json::json;

	use super::*;

	fn cli(args: &[&str]) -> Cli {
		Cli::try_parse_from(std::iter::once("runjs").chain(args.iter().copied())).unwrap()
	}

	#[test]
	fn args_parse_as_json_or_fall_back_to_strings() {
		assert_eq!(parse_arg("42"), json!(42));
		assert_eq!(parse_arg(r#"{"a":[1]}"#), json!({ "a": [1] }));
		assert_eq!(parse_arg("\"quoted\""), json!("quoted"));
		assert_eq!(parse_arg("plain words"), json!("plain words"));
	}

	#[test]
	fn target_list_skips_blanks_and_comments() {
		let text = "# smoke targets\nhttps://a.test/\n\n  @current  \n# end\nnav/login.json\n";
		assert_eq!(parse_target_list(text), vec!["https://a.test/", "@current", "nav/login.json"]);
	}

	#[test]
	fn no_flags_means_defaults() {
		assert_eq!(cli(&[]).run_options().unwrap(), RunOptions::default());
	}

	#[test]
	fn flags_override_config_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"{{"provider":"firefox","server":"http://grid:4444","concurrency":3,"scriptArgs":[1]}}"#
		)
		.unwrap();
		let path = file.path().to_str().unwrap();

		let options = cli(&["--config", path, "-c", "5", "--arg", "x"]).run_options().unwrap();

		assert_eq!(options.provider, "firefox");
		assert_eq!(options.server.as_deref(), Some("http://grid:4444"));
		assert_eq!(options.concurrency, 5);
		assert_eq!(options.script_args, vec![json!("x")]);
	}

	#[test]
	fn async_flag_and_timeout_apply() {
		let options = cli(&["--async", "--script-timeout", "3"]).run_options().unwrap();
		assert_eq!(options.mode, ExecutionMode::Async);
		assert_eq!(options.script_timeout, Duration::from_secs(3));
	}

	#[test]
	fn browser_options_must_be_json() {
		let err = cli(&["--browser-options", "{nope"]).run_options().unwrap_err();
		assert!(matches!(err, CliError::Config(_)));

		let options = cli(&["--browser-options", r#"{"args":["--headless"]}"#]).run_options().unwrap();
		assert_eq!(options.provider_options, Some(json!({ "args": ["--headless"] })));
	}

	#[test]
	fn malformed_config_file_is_reported_with_its_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "not json").unwrap();
		let err = load_config(file.path()).unwrap_err();
		assert!(matches!(err, CliError::ConfigFile { .. }));
		assert!(err.to_string().contains(&file.path().display().to_string()));
	}

	#[tokio::test]
	async fn script_is_read_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "return ARGS[0];").unwrap();
		let path = file.path().to_str().unwrap();

		assert_eq!(cli(&["--script", path]).read_script().await.unwrap(), "return ARGS[0];");
	}

	#[tokio::test]
	async fn missing_script_file_names_the_path() {
		let err = cli(&["--script", "/nonexistent/page-title.js"]).read_script().await.unwrap_err();
		assert!(matches!(err, CliError::Read { .. }));
		assert!(err.to_string().contains("/nonexistent/page-title.js"));
	}

	#[test]
	fn target_list_is_appended_to_positionals() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "# list\n@current").unwrap();
		let path = file.path().to_str().unwrap();

		let targets = cli(&["https://a.test/", "--target-list", path]).all_targets().unwrap();
		assert_eq!(targets, vec!["https://a.test/", "@current"]);
	}
}
