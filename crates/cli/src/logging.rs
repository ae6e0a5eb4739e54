use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::error::{CliError, Result};

fn default_filter(verbosity: u8) -> &'static str {
	// 0 = warnings only
	// 1 (-v) = runner progress
	// 2+ (-vv) = pipeline steps and WebDriver traffic
	match verbosity {
		0 => "warn",
		1 => "warn,runjs=info",
		2 => "info,runjs=debug",
		_ => "debug,runjs=trace",
	}
}

/// Installs the stderr subscriber.
///
/// `--log-filter` wins over `RUST_LOG`, which wins over the verbosity level.
pub fn init_logging(verbosity: u8, directives: Option<&str>) -> Result<()> {
	let env_filter = match directives {
		Some(d) => EnvFilter::try_new(d).map_err(|e| CliError::Config(format!("invalid log filter '{d}': {e}")))?,
		None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity))),
	};

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
	Ok(())
}
