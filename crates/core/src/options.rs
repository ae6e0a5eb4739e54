//! Run configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::provider::Provider;

/// How the payload is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
	/// The payload's return value is the result.
	#[default]
	Sync,
	/// The payload calls its completion callback with the result.
	Async,
}

/// Options shared by every pipeline of a runner.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "provider": "firefox", "concurrency": 4, "mode": "async", "scriptTimeoutMs": 30000 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunOptions {
	/// Provider identity, e.g. `"chrome"`.
	pub provider: String,
	/// Remote session-server address.
	pub server: Option<String>,
	/// Number of lanes.
	pub concurrency: usize,
	pub mode: ExecutionMode,
	/// Script timeout installed in async mode.
	#[serde(rename = "scriptTimeoutMs", with = "millis")]
	pub script_timeout: Duration,
	/// Positional arguments passed after the payload.
	pub script_args: Vec<Value>,
	/// Provider-specific options blob.
	pub provider_options: Option<Value>,
}

impl Default for RunOptions {
	fn default() -> Self {
		Self {
			provider: "chrome".into(),
			server: None,
			concurrency: 1,
			mode: ExecutionMode::Sync,
			script_timeout: Duration::from_secs(10),
			script_args: Vec::new(),
			provider_options: None,
		}
	}
}

impl RunOptions {
	/// Checks lane count and provider identity.
	///
	/// # Errors
	///
	/// Returns [`Error::Config`] describing the first invalid field.
	pub fn validate(&self) -> Result<&'static Provider> {
		if self.concurrency == 0 {
			return Err(Error::Config("concurrency must be at least 1".into()));
		}
		Provider::lookup(&self.provider).ok_or_else(|| {
			Error::Config(format!(
				"unknown provider '{}' (expected one of: {})",
				self.provider,
				Provider::names().join(", ")
			))
		})
	}

	pub fn is_async(&self) -> bool {
		self.mode == ExecutionMode::Async
	}
}

mod millis {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(value.as_millis() as u64)
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}
