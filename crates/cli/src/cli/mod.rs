
use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;
use crate::styles::cli_styles;

/// Run one script against many WebDriver targets.
///
/// Targets are absolute addresses (`https://example.com/`), tab references
/// (`@current`) or paths to JSON navigation modules.
#[derive(Parser, Debug)]
#[command(name = "runjs")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Targets to run the script against
	#[arg(value_name = "TARGETS")]
	pub targets: Vec<String>,

	/// Read the script from FILE instead of stdin
	#[arg(short, long, value_name = "FILE")]
	pub script: Option<PathBuf>,

	/// Append targets from FILE, one per line (`#` starts a comment)
	#[arg(long, value_name = "FILE")]
	pub target_list: Option<PathBuf>,

	/// Browser provider: chrome (default), firefox, edge or safari
	#[arg(short, long, value_name = "NAME")]
	pub browser: Option<String>,

	/// WebDriver server address
	#[arg(long, value_name = "URL")]
	pub server: Option<String>,

	/// Number of lanes
	#[arg(short, long, value_name = "N")]
	pub concurrency: Option<usize>,

	/// Run the script asynchronously; it must call the callback passed as its last argument
	#[arg(long = "async")]
	pub asynchronous: bool,

	/// Async script timeout in seconds
	#[arg(long, value_name = "SECS")]
	pub script_timeout: Option<u64>,

	/// Positional script argument, parsed as JSON or taken as a string (repeatable)
	#[arg(long = "arg", value_name = "VALUE")]
	pub args: Vec<String>,

	/// Provider-specific options as a JSON object
	#[arg(long, value_name = "JSON")]
	pub browser_options: Option<String>,

	/// Load run options from a JSON file; flags override its values
	#[arg(long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Resolve relative navigation-module paths against DIR
	#[arg(long, value_name = "DIR")]
	pub navigation_dir: Option<PathBuf>,

	/// HTTP timeout for each WebDriver command, in seconds
	#[arg(long, value_name = "SECS", default_value_t = 120)]
	pub command_timeout: u64,

	/// Output format: json (default), toon, ndjson, or text
	#[arg(short = 'f', long, value_enum, default_value = "json")]
	pub format: OutputFormat,

	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Tracing filter directives, e.g. `runjs.webdriver=trace`
	#[arg(long, value_name = "DIRECTIVES")]
	pub log_filter: Option<String>,
}
