//! Response envelope and error bodies.
//!
//! Every WebDriver response, success or failure, wraps its payload in a
//! `{"value": ...}` object. Failures carry an [`ErrorValue`] there.

use serde::{Deserialize, Serialize};

/// `{"value": T}` envelope shared by every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
	pub value: T,
}

/// Error payload of a failed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorValue {
	/// Error code such as `"no such window"` or `"javascript error"`.
	pub error: String,
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub stacktrace: Option<String>,
}
