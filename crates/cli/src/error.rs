use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Failures that stop the CLI before or after a run. Per-target failures
/// are reported in the output instead.
#[derive(Debug, Error)]
pub enum CliError {
	#[error("failed to read {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to read script from stdin: {0}")]
	Stdin(#[source] std::io::Error),

	#[error("invalid config file {path}: {source}")]
	ConfigFile {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("{0}")]
	Config(String),

	#[error(transparent)]
	Run(#[from] runjs::Error),

	#[error(transparent)]
	Driver(#[from] runjs_runtime::Error),

	#[error("failed to write results: {0}")]
	Output(String),
}
