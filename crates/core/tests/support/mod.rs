//! Recording session driver for runner tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use runjs::{
	AbortHandle, BoxFut, Capabilities, DriverResult, Session, SessionBuilder, SessionRequest,
};
use serde_json::{Value, json};
use url::Url;

/// One call observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	Build {
		session: usize,
		provider: String,
		server: Option<String>,
		capabilities: Capabilities,
		lane: usize,
	},
	Navigate {
		session: usize,
		url: String,
	},
	Execute {
		session: usize,
		script: String,
		args: Vec<Value>,
		asynchronous: bool,
	},
	Title {
		session: usize,
	},
	ScriptTimeout {
		session: usize,
		timeout: Duration,
	},
	Quit {
		session: usize,
	},
}

/// Behavior knobs and the call log shared by the builder and its sessions.
#[derive(Default)]
pub struct MockState {
	pub calls: Mutex<Vec<Call>>,
	next_session: AtomicUsize,
	/// Build fails when set.
	pub fail_build: Mutex<Option<String>>,
	/// Navigation to any of these addresses fails.
	pub failing_urls: Mutex<Vec<String>>,
	/// Script value per loaded address; unknown addresses yield `1`.
	pub results: Mutex<HashMap<String, Value>>,
	/// Script execution fails with this message when set.
	pub script_error: Mutex<Option<String>>,
	/// Title fetch fails when set.
	pub title_error: Mutex<Option<String>>,
	/// Quit fails when set.
	pub quit_error: Mutex<Option<String>>,
	/// Aborted from inside the first script execution when set.
	pub abort_on_execute: Mutex<Option<AbortHandle>>,
	/// Aborted from inside the first script-timeout call when set.
	pub abort_on_timeout: Mutex<Option<AbortHandle>>,
	/// Navigation to these addresses waits until notified.
	holds: Mutex<HashMap<String, Arc<Notify>>>,
}

impl MockState {
	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().clone()
	}

	pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
		self.calls.lock().iter().filter(|c| pred(c)).count()
	}

	pub fn quits(&self) -> usize {
		self.count(|c| matches!(c, Call::Quit { .. }))
	}

	pub fn builds(&self) -> usize {
		self.count(|c| matches!(c, Call::Build { .. }))
	}

	pub fn executes(&self) -> usize {
		self.count(|c| matches!(c, Call::Execute { .. }))
	}

	pub fn navigations(&self) -> usize {
		self.count(|c| matches!(c, Call::Navigate { .. }))
	}

	/// Parks navigation to `url` until the returned gate is notified.
	pub fn hold(&self, url: &str) -> Arc<Notify> {
		let gate = Arc::new(Notify::new());
		self.holds.lock().insert(url.to_string(), Arc::clone(&gate));
		gate
	}

	/// Session ids in the order they were released.
	pub fn quit_order(&self) -> Vec<usize> {
		self.calls
			.lock()
			.iter()
			.filter_map(|c| match c {
				Call::Quit { session } => Some(*session),
				_ => None,
			})
			.collect()
	}

	/// Quit count per session id.
	pub fn quits_per_session(&self) -> HashMap<usize, usize> {
		let mut map = HashMap::new();
		for call in self.calls.lock().iter() {
			if let Call::Quit { session } = call {
				*map.entry(*session).or_insert(0) += 1;
			}
		}
		map
	}

	fn record(&self, call: Call) {
		self.calls.lock().push(call);
	}
}

#[derive(Clone, Default)]
pub struct MockBuilder {
	pub state: Arc<MockState>,
}

impl MockBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn shared(&self) -> Arc<dyn SessionBuilder> {
		Arc::new(self.clone())
	}
}

impl SessionBuilder for MockBuilder {
	fn build<'a>(&'a self, request: SessionRequest<'a>) -> BoxFut<'a, DriverResult<Box<dyn Session>>> {
		Box::pin(async move {
			if let Some(msg) = self.state.fail_build.lock().clone() {
				return Err(msg.into());
			}
			let id = self.state.next_session.fetch_add(1, Ordering::SeqCst);
			self.state.record(Call::Build {
				session: id,
				provider: request.provider.to_string(),
				server: request.server.map(str::to_string),
				capabilities: request.capabilities.clone(),
				lane: request.lane.id(),
			});
			Ok(Box::new(MockSession {
				id,
				state: Arc::clone(&self.state),
				current_url: Mutex::new(None),
			}) as Box<dyn Session>)
		})
	}
}

pub struct MockSession {
	id: usize,
	state: Arc<MockState>,
	current_url: Mutex<Option<String>>,
}

impl Session for MockSession {
	fn navigate<'a>(&'a self, url: &'a Url) -> BoxFut<'a, DriverResult<()>> {
		Box::pin(async move {
			self.state.record(Call::Navigate {
				session: self.id,
				url: url.to_string(),
			});
			let gate = self.state.holds.lock().get(url.as_str()).cloned();
			if let Some(gate) = gate {
				gate.notified().await;
			}
			if self.state.failing_urls.lock().iter().any(|u| u == url.as_str()) {
				return Err(format!("cannot reach {url}").into());
			}
			*self.current_url.lock() = Some(url.to_string());
			Ok(())
		})
	}

	fn execute_script<'a>(&'a self, script: &'a str, args: &'a [Value]) -> BoxFut<'a, DriverResult<Value>> {
		Box::pin(self.execute(script, args, false))
	}

	fn execute_async_script<'a>(
		&'a self,
		script: &'a str,
		args: &'a [Value],
	) -> BoxFut<'a, DriverResult<Value>> {
		Box::pin(self.execute(script, args, true))
	}

	fn title(&self) -> BoxFut<'_, DriverResult<String>> {
		Box::pin(async move {
			self.state.record(Call::Title { session: self.id });
			if let Some(msg) = self.state.title_error.lock().clone() {
				return Err(msg.into());
			}
			Ok(format!("title {}", self.id))
		})
	}

	fn set_script_timeout(&self, timeout: Duration) -> BoxFut<'_, DriverResult<()>> {
		Box::pin(async move {
			self.state.record(Call::ScriptTimeout {
				session: self.id,
				timeout,
			});
			if let Some(handle) = self.state.abort_on_timeout.lock().take() {
				handle.abort();
			}
			Ok(())
		})
	}

	fn quit(self: Box<Self>) -> BoxFut<'static, DriverResult<()>> {
		Box::pin(async move {
			self.state.record(Call::Quit { session: self.id });
			if let Some(msg) = self.state.quit_error.lock().clone() {
				return Err(msg.into());
			}
			Ok(())
		})
	}
}

impl MockSession {
	async fn execute(&self, script: &str, args: &[Value], asynchronous: bool) -> DriverResult<Value> {
		self.state.record(Call::Execute {
			session: self.id,
			script: script.to_string(),
			args: args.to_vec(),
			asynchronous,
		});
		if let Some(handle) = self.state.abort_on_execute.lock().take() {
			handle.abort();
		}
		if let Some(msg) = self.state.script_error.lock().clone() {
			return Err(msg.into());
		}
		let url = self.current_url.lock().clone();
		let value = url
			.and_then(|u| self.state.results.lock().get(&u).cloned())
			.unwrap_or_else(|| json!(1));
		Ok(value)
	}
}
