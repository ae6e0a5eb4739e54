//! Typed target classification.
//!
//! A raw target string is parsed once into a [`Target`] and then mapped to
//! the [`NavigationAction`] a pipeline performs. Classification is purely
//! syntactic: a string with a URI scheme is an address, `@name` is a tab
//! reference, anything else is a navigation-module path.

use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::error::{Error, Result};

/// Tab reference that stays on whatever page the session already shows.
pub const CURRENT_TAB: &str = "current";

/// A parsed target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
	/// `@name`: a tab inside the session.
	TabReference(String),
	/// Path to a navigation module.
	NavigationModule(PathBuf),
	/// Address loaded directly by the session.
	DirectAddress(Url),
}

/// What a pipeline does to bring the session to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
	/// Keep the current page.
	Stay,
	/// Load and run the navigation module at this path.
	RunModule(PathBuf),
	/// Load this address.
	Load(Url),
}

impl Target {
	/// Classifies `raw`. Never fails; unsupported tab names are reported by
	/// [`Target::action`].
	pub fn parse(raw: &str) -> Self {
		if let Some(name) = raw.strip_prefix('@') {
			return Target::TabReference(name.to_string());
		}
		match Url::parse(raw) {
			// `C:\nav.json` parses with scheme `c`; that is a drive letter.
			Ok(url) if url.scheme().len() > 1 => Target::DirectAddress(url),
			_ => Target::NavigationModule(PathBuf::from(raw)),
		}
	}

	/// Maps this target to its navigation action.
	///
	/// # Errors
	///
	/// Returns [`Error::UnsupportedTarget`] for any tab reference other than
	/// `@current`.
	pub fn action(&self) -> Result<NavigationAction> {
		match self {
			Target::TabReference(name) if name == CURRENT_TAB => Ok(NavigationAction::Stay),
			Target::TabReference(name) => Err(Error::UnsupportedTarget(name.clone())),
			Target::NavigationModule(path) => Ok(NavigationAction::RunModule(path.clone())),
			Target::DirectAddress(url) => Ok(NavigationAction::Load(url.clone())),
		}
	}
}

impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Target::TabReference(name) => write!(f, "@{name}"),
			Target::NavigationModule(path) => write!(f, "{}", path.display()),
			Target::DirectAddress(url) => write!(f, "{url}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn http_url_is_direct_address() {
		let target = Target::parse("https://example.com/page");
		assert!(matches!(target, Target::DirectAddress(_)));
		assert_eq!(
			target.action().unwrap(),
			NavigationAction::Load(Url::parse("https://example.com/page").unwrap())
		);
	}

	#[test]
	fn any_scheme_is_direct_address() {
		assert!(matches!(Target::parse("uri:uri1"), Target::DirectAddress(_)));
		assert!(matches!(
			Target::parse("data:text/html,<h1>Test</h1>"),
			Target::DirectAddress(_)
		));
		assert!(matches!(Target::parse("about:blank"), Target::DirectAddress(_)));
	}

	#[test]
	fn relative_path_is_navigation_module() {
		let target = Target::parse("navigation/search.json");
		assert_eq!(target, Target::NavigationModule(PathBuf::from("navigation/search.json")));
		assert_eq!(
			target.action().unwrap(),
			NavigationAction::RunModule(PathBuf::from("navigation/search.json"))
		);
	}

	#[test]
	fn absolute_path_is_navigation_module() {
		assert!(matches!(
			Target::parse("/tmp/navigation.json"),
			Target::NavigationModule(_)
		));
	}

	#[test]
	fn windows_drive_path_is_navigation_module() {
		assert!(matches!(
			Target::parse(r"C:\scripts\nav.json"),
			Target::NavigationModule(_)
		));
	}

	#[test]
	fn current_tab_stays() {
		let target = Target::parse("@current");
		assert_eq!(target, Target::TabReference("current".into()));
		assert_eq!(target.action().unwrap(), NavigationAction::Stay);
	}

	#[test]
	fn other_tab_is_unsupported() {
		let err = Target::parse("@unsupported").action().unwrap_err();
		assert!(matches!(err, Error::UnsupportedTarget(name) if name == "unsupported"));
	}

	#[test]
	fn display_round_trips_raw_form() {
		assert_eq!(Target::parse("@current").to_string(), "@current");
		assert_eq!(Target::parse("nav.json").to_string(), "nav.json");
	}
}
