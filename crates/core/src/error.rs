//! Error types for runjs.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::DriverError;

/// Result type alias for runjs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the runner and its pipelines.
///
/// Only [`Error::Config`] escapes [`ScriptRunner`](crate::ScriptRunner)
/// construction. Every other variant is produced inside a pipeline and ends
/// up as the `error` string of that target's
/// [`ExecutionResult`](crate::ExecutionResult).
#[derive(Debug, Error)]
pub enum Error {
	/// Invalid run options (lane count, unknown provider, ...).
	#[error("invalid configuration: {0}")]
	Config(String),

	/// Tab reference other than `@current`.
	#[error("unsupported target: @{0} (only @current is supported)")]
	UnsupportedTarget(String),

	/// The session builder failed to create a session.
	#[error("failed to create session: {0}")]
	SessionCreate(#[source] DriverError),

	/// Installing the script timeout failed.
	#[error("failed to set script timeout: {0}")]
	Prepare(#[source] DriverError),

	/// Loading the address or running the navigation module failed.
	#[error("navigation to {target} failed: {source}")]
	Navigation {
		target: String,
		#[source]
		source: DriverError,
	},

	/// The navigation module could not be loaded.
	#[error("failed to load navigation module {}: {reason}", path.display())]
	NavigationModule { path: PathBuf, reason: String },

	/// Reading the page title failed.
	#[error("failed to read title: {0}")]
	Metadata(#[source] DriverError),

	/// The script threw, timed out, or returned an unserializable value.
	#[error("script execution failed: {0}")]
	Script(#[source] DriverError),

	/// The runner was aborted before this step started.
	#[error("aborted")]
	Aborted,
}

impl Error {
	/// Returns true if this error is the synthetic abort error.
	pub fn is_aborted(&self) -> bool {
		matches!(self, Error::Aborted)
	}

	/// Returns true if this error is fatal for the whole run.
	pub fn is_config(&self) -> bool {
		matches!(self, Error::Config(_))
	}
}
