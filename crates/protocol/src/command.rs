//! Request bodies for session commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /session/{id}/url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateRequest {
	pub url: String,
}

/// Body of `POST /session/{id}/execute/sync` and `.../execute/async`.
///
/// The remote end wraps `script` in a function body, so `arguments` inside
/// the script refers to `args`. For async execution the completion callback
/// is appended as the last argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteScriptRequest {
	pub script: String,
	pub args: Vec<Value>,
}

/// Body of `POST /session/{id}/timeouts`.
///
/// All durations are milliseconds. Unset fields are omitted so the remote
/// end keeps its current value for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeouts {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub script: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub page_load: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub implicit: Option<u64>,
}

impl Timeouts {
	/// Timeouts body that only changes the script timeout.
	pub fn script(ms: u64) -> Self {
		Self {
			script: Some(ms),
			..Default::default()
		}
	}
}
