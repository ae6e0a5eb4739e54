//! Declarative navigation modules.
//!
//! A navigation module is a JSON file describing the steps that bring a
//! fresh session to the page the script should run on:
//!
//! ```json
//! { "steps": [
//!   { "goto": "https://www.google.com/" },
//!   { "execute": "document.querySelector('[name=q]').value = 'webdriver'; document.forms[0].submit();" },
//!   { "waitForTitle": { "contains": "webdriver", "timeoutMs": 1000 } }
//! ] }
//! ```
//!
//! [`PlanLoader`] is the default [`NavigationLoader`] of a
//! [`ScriptRunner`](crate::ScriptRunner).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, sleep};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::session::{BoxFut, DriverResult, NavigationLoader, NavigationModule, Session};

const TITLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn default_title_timeout_ms() -> u64 {
	5_000
}

/// One navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationStep {
	/// Load an absolute address.
	Goto(String),
	/// Run a script synchronously and discard its value.
	Execute(String),
	/// Poll the title until it contains `contains`.
	WaitForTitle {
		contains: String,
		#[serde(default = "default_title_timeout_ms", rename = "timeoutMs")]
		timeout_ms: u64,
	},
	/// Pause.
	SleepMs(u64),
}

/// Ordered list of navigation steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPlan {
	pub steps: Vec<NavigationStep>,
}

impl NavigationPlan {
	/// Parses a plan and checks that every `goto` address is absolute.
	pub fn from_json(text: &str) -> std::result::Result<Self, String> {
		let plan: NavigationPlan = serde_json::from_str(text).map_err(|e| e.to_string())?;
		for step in &plan.steps {
			if let NavigationStep::Goto(addr) = step {
				Url::parse(addr).map_err(|e| format!("invalid goto address '{addr}': {e}"))?;
			}
		}
		Ok(plan)
	}

	async fn run(&self, session: &dyn Session) -> DriverResult<()> {
		for step in &self.steps {
			match step {
				NavigationStep::Goto(addr) => {
					debug!(target: "runjs.navigation", url = %addr, "goto");
					let url = Url::parse(addr)?;
					session.navigate(&url).await?;
				}
				NavigationStep::Execute(script) => {
					debug!(target: "runjs.navigation", "execute");
					session.execute_script(script, &[]).await?;
				}
				NavigationStep::WaitForTitle { contains, timeout_ms } => {
					wait_for_title(session, contains, Duration::from_millis(*timeout_ms)).await?;
				}
				NavigationStep::SleepMs(ms) => sleep(Duration::from_millis(*ms)).await,
			}
		}
		Ok(())
	}
}

async fn wait_for_title(session: &dyn Session, needle: &str, timeout: Duration) -> DriverResult<()> {
	let deadline = Instant::now() + timeout;
	loop {
		let title = session.title().await?;
		if title.contains(needle) {
			debug!(target: "runjs.navigation", %title, "title matched");
			return Ok(());
		}
		if Instant::now() >= deadline {
			return Err(format!(
				"timeout after {}ms waiting for title containing '{needle}' (last title: '{title}')",
				timeout.as_millis()
			)
			.into());
		}
		sleep(TITLE_POLL_INTERVAL).await;
	}
}

impl NavigationModule for NavigationPlan {
	fn navigate<'a>(&'a self, session: &'a dyn Session) -> BoxFut<'a, DriverResult<()>> {
		Box::pin(self.run(session))
	}
}

/// Loads [`NavigationPlan`] files from disk.
#[derive(Debug, Clone, Default)]
pub struct PlanLoader {
	base_dir: Option<PathBuf>,
}

impl PlanLoader {
	/// Resolves relative module paths against `dir` instead of the current
	/// directory.
	pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
		Self {
			base_dir: Some(dir.into()),
		}
	}

	fn resolve(&self, path: &Path) -> PathBuf {
		match &self.base_dir {
			Some(base) if path.is_relative() => base.join(path),
			_ => path.to_path_buf(),
		}
	}
}

impl NavigationLoader for PlanLoader {
	fn load<'a>(&'a self, path: &'a Path) -> BoxFut<'a, Result<Arc<dyn NavigationModule>>> {
		Box::pin(async move {
			let resolved = self.resolve(path);
			debug!(target: "runjs.navigation", path = %resolved.display(), "loading navigation module");
			let text = tokio::fs::read_to_string(&resolved)
				.await
				.map_err(|e| Error::NavigationModule {
					path: resolved.clone(),
					reason: e.to_string(),
				})?;
			let plan = NavigationPlan::from_json(&text).map_err(|reason| Error::NavigationModule {
				path: resolved.clone(),
				reason,
			})?;
			Ok(Arc::new(plan) as Arc<dyn NavigationModule>)
		})
	}
}
