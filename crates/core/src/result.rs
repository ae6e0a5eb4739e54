//! Per-target result record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Outcome of one pipeline.
///
/// Exactly one of `result` and `error` is set. A script returning `null` or
/// `undefined` has `result: Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
	pub target: String,
	pub provider: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub result: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl ExecutionResult {
	pub(crate) fn new(target: impl Into<String>, provider: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			provider: provider.into(),
			title: None,
			result: None,
			error: None,
		}
	}

	pub(crate) fn succeed(&mut self, value: Value) {
		self.result = Some(value);
		self.error = None;
	}

	pub(crate) fn fail(&mut self, error: &Error) {
		self.result = None;
		self.error = Some(error.to_string());
	}

	pub fn is_ok(&self) -> bool {
		self.error.is_none()
	}
}
