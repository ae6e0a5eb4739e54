//! Collaborator traits: session driver and navigation modules.
//!
//! The runner never talks to a browser directly. It asks a [`SessionBuilder`]
//! for one [`Session`] per target and drives it through the methods below.
//! Navigation modules plug custom navigation logic in through
//! [`NavigationLoader`].

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use url::Url;

pub use runjs_protocol::Capabilities;

use crate::lanes::Lane;

/// Boxing alias: stable async in trait without `async_trait`.
pub type BoxFut<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error reported by a collaborator.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for collaborator calls.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Everything a builder needs to create one session.
#[derive(Debug, Clone)]
pub struct SessionRequest<'a> {
	/// Provider identity, e.g. `"chrome"`.
	pub provider: &'a str,
	/// Remote session-server address, if configured.
	pub server: Option<&'a str>,
	/// Capabilities including any provider-specific options blob.
	pub capabilities: &'a Capabilities,
	/// Serialization context the session must issue its commands on.
	pub lane: Lane,
}

/// Creates sessions. Shared by every pipeline of a runner.
pub trait SessionBuilder: Send + Sync {
	fn build<'a>(&'a self, request: SessionRequest<'a>) -> BoxFut<'a, DriverResult<Box<dyn Session>>>;
}

/// A live remote execution context, owned by exactly one pipeline.
pub trait Session: Send + Sync {
	/// Loads `url` in the current tab.
	fn navigate<'a>(&'a self, url: &'a Url) -> BoxFut<'a, DriverResult<()>>;

	/// Runs `script` to completion and returns its value.
	fn execute_script<'a>(&'a self, script: &'a str, args: &'a [Value]) -> BoxFut<'a, DriverResult<Value>>;

	/// Runs `script` and waits until it invokes its completion callback or
	/// the session's script timeout elapses.
	fn execute_async_script<'a>(
		&'a self,
		script: &'a str,
		args: &'a [Value],
	) -> BoxFut<'a, DriverResult<Value>>;

	/// Reads the title of the current document.
	fn title(&self) -> BoxFut<'_, DriverResult<String>>;

	/// Sets the timeout applied to async script execution.
	fn set_script_timeout(&self, timeout: Duration) -> BoxFut<'_, DriverResult<()>>;

	/// Terminates the session. Consumes it, so release happens at most once.
	fn quit(self: Box<Self>) -> BoxFut<'static, DriverResult<()>>;
}

/// Custom navigation logic for one target.
pub trait NavigationModule: Send + Sync {
	fn navigate<'a>(&'a self, session: &'a dyn Session) -> BoxFut<'a, DriverResult<()>>;
}

/// Resolves a navigation module from a filesystem path.
pub trait NavigationLoader: Send + Sync {
	fn load<'a>(&'a self, path: &'a Path) -> BoxFut<'a, crate::Result<Arc<dyn NavigationModule>>>;
}
