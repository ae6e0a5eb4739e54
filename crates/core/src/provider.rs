//! Provider registry.
//!
//! Maps a provider identity to the `browserName` capability and to the
//! function that attaches the provider-specific options blob. Adding a
//! provider means adding an entry to [`PROVIDERS`].

use serde_json::Value;
use tracing::{debug, warn};

use crate::session::Capabilities;

/// Attaches a vendor options blob to a capability map.
pub type AttachOptions = fn(&mut Capabilities, Value);

/// One known provider.
#[derive(Debug)]
pub struct Provider {
	name: &'static str,
	browser_name: &'static str,
	attach_options: Option<AttachOptions>,
}

/// Every provider runjs knows how to configure.
pub static PROVIDERS: &[Provider] = &[
	Provider {
		name: "chrome",
		browser_name: "chrome",
		attach_options: Some(attach_chrome_options),
	},
	Provider {
		name: "firefox",
		browser_name: "firefox",
		attach_options: Some(attach_firefox_options),
	},
	Provider {
		name: "edge",
		browser_name: "MicrosoftEdge",
		attach_options: Some(attach_edge_options),
	},
	Provider {
		name: "safari",
		browser_name: "safari",
		attach_options: None,
	},
];

fn attach_chrome_options(caps: &mut Capabilities, options: Value) {
	caps.insert("goog:chromeOptions".into(), options);
}

fn attach_firefox_options(caps: &mut Capabilities, options: Value) {
	caps.insert("moz:firefoxOptions".into(), options);
}

fn attach_edge_options(caps: &mut Capabilities, options: Value) {
	caps.insert("ms:edgeOptions".into(), options);
}

impl Provider {
	/// Finds a provider by name (case-insensitive).
	pub fn lookup(name: &str) -> Option<&'static Provider> {
		PROVIDERS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
	}

	/// Names of all known providers.
	pub fn names() -> Vec<&'static str> {
		PROVIDERS.iter().map(|p| p.name).collect()
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Builds the capabilities for a new session.
	///
	/// The options blob is attached only when this provider has an options
	/// key; otherwise it is dropped with a warning.
	pub fn capabilities(&self, options: Option<&Value>) -> Capabilities {
		let mut caps = Capabilities::new();
		caps.insert("browserName".into(), Value::from(self.browser_name));

		if let Some(options) = options {
			match self.attach_options {
				Some(attach) => {
					debug!(target: "runjs.runner", provider = self.name, "attaching provider options");
					attach(&mut caps, options.clone());
				}
				None => warn!(
					target: "runjs.runner",
					provider = self.name,
					"provider has no options capability; ignoring provider options"
				),
			}
		}

		caps
	}
}
