//! Session creation bodies.
//!
//! A new session is requested with `POST /session`. Capabilities are sent in
//! the `alwaysMatch` slot; `firstMatch` is never used by runjs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Capability map sent to the remote end.
pub type Capabilities = Map<String, Value>;

/// Body of `POST /session`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSessionRequest {
	pub capabilities: CapabilitiesRequest,
}

/// Capability negotiation block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesRequest {
	/// Capabilities every matched configuration must satisfy.
	pub always_match: Capabilities,
}

impl NewSessionRequest {
	pub fn new(always_match: Capabilities) -> Self {
		Self {
			capabilities: CapabilitiesRequest { always_match },
		}
	}
}

/// `value` of a successful `POST /session` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionResponse {
	/// Opaque identifier used in every subsequent command path.
	pub session_id: String,
	/// Capabilities the remote end actually granted.
	#[serde(default)]
	pub capabilities: Capabilities,
}
