//! Session builder and live sessions.

use std::time::Duration;

use runjs::{BoxFut, Capabilities, DriverResult, Lane, Session, SessionBuilder, SessionRequest};
use runjs_protocol::{
	ExecuteScriptRequest, NavigateRequest, NewSessionRequest, NewSessionResponse, Timeouts,
};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::client::Client;
use crate::error::Result;

/// Remote end used when neither the request nor the builder names one.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:4444";

/// HTTP timeout applied to every command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(120);

/// Opens WebDriver sessions over HTTP.
#[derive(Debug, Clone)]
pub struct WebDriverBuilder {
	http: reqwest::Client,
	default_server: Url,
}

impl WebDriverBuilder {
	pub fn new() -> Result<Self> {
		Self::with_command_timeout(DEFAULT_COMMAND_TIMEOUT)
	}

	/// Builder whose HTTP requests give up after `timeout`.
	pub fn with_command_timeout(timeout: Duration) -> Result<Self> {
		let http = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self {
			http,
			default_server: Url::parse(DEFAULT_SERVER)?,
		})
	}

	/// Remote end for requests that do not name a server.
	pub fn with_default_server(mut self, server: &str) -> Result<Self> {
		self.default_server = Url::parse(server)?;
		Ok(self)
	}

	/// Creates a session on `server` (or the default server) and binds it to
	/// `lane`.
	pub async fn connect(
		&self,
		server: Option<&str>,
		capabilities: &Capabilities,
		lane: Lane,
	) -> Result<WebDriverSession> {
		let server = match server {
			Some(s) => Url::parse(s)?,
			None => self.default_server.clone(),
		};
		let client = Client::new(self.http.clone(), &server);
		let body = NewSessionRequest::new(capabilities.clone());

		let created: NewSessionResponse = {
			let _turn = lane.enter().await;
			client.post("session", &body).await?
		};
		debug!(
			target: "runjs.webdriver",
			server = %server,
			session = %created.session_id,
			lane = lane.id(),
			"session created"
		);

		Ok(WebDriverSession {
			client,
			id: created.session_id,
			capabilities: created.capabilities,
			lane,
		})
	}
}

impl SessionBuilder for WebDriverBuilder {
	fn build<'a>(&'a self, request: SessionRequest<'a>) -> BoxFut<'a, DriverResult<Box<dyn Session>>> {
		Box::pin(async move {
			let session = self
				.connect(request.server, request.capabilities, request.lane)
				.await?;
			Ok(Box::new(session) as Box<dyn Session>)
		})
	}
}

/// A live WebDriver session. Every command waits for its lane's turn.
#[derive(Debug)]
pub struct WebDriverSession {
	client: Client,
	id: String,
	capabilities: Capabilities,
	lane: Lane,
}

impl WebDriverSession {
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Capabilities the remote end reported at creation.
	pub fn capabilities(&self) -> &Capabilities {
		&self.capabilities
	}

	fn path(&self, command: &str) -> String {
		format!("session/{}/{command}", self.id)
	}

	pub async fn goto(&self, url: &Url) -> Result<()> {
		let _turn = self.lane.enter().await;
		let body = NavigateRequest { url: url.to_string() };
		let _: Value = self.client.post(&self.path("url"), &body).await?;
		Ok(())
	}

	pub async fn execute(&self, script: &str, args: &[Value], asynchronous: bool) -> Result<Value> {
		let _turn = self.lane.enter().await;
		let command = if asynchronous { "execute/async" } else { "execute/sync" };
		let body = ExecuteScriptRequest {
			script: script.to_string(),
			args: args.to_vec(),
		};
		self.client.post(&self.path(command), &body).await.inspect_err(|e| {
			if e.is_script_timeout() {
				debug!(target: "runjs.webdriver", session = %self.id, "script timed out");
			}
		})
	}

	pub async fn get_title(&self) -> Result<String> {
		let _turn = self.lane.enter().await;
		self.client.get(&self.path("title")).await
	}

	pub async fn script_timeout(&self, timeout: Duration) -> Result<()> {
		let _turn = self.lane.enter().await;
		let body = Timeouts::script(timeout.as_millis() as u64);
		let _: Value = self.client.post(&self.path("timeouts"), &body).await?;
		Ok(())
	}

	/// Deletes the session on the remote end.
	pub async fn delete(self) -> Result<()> {
		let _turn = self.lane.enter().await;
		let _: Value = self.client.delete(&format!("session/{}", self.id)).await?;
		debug!(target: "runjs.webdriver", session = %self.id, "session deleted");
		Ok(())
	}
}

impl Session for WebDriverSession {
	fn navigate<'a>(&'a self, url: &'a Url) -> BoxFut<'a, DriverResult<()>> {
		Box::pin(async move { Ok(self.goto(url).await?) })
	}

	fn execute_script<'a>(&'a self, script: &'a str, args: &'a [Value]) -> BoxFut<'a, DriverResult<Value>> {
		Box::pin(async move { Ok(self.execute(script, args, false).await?) })
	}

	fn execute_async_script<'a>(
		&'a self,
		script: &'a str,
		args: &'a [Value],
	) -> BoxFut<'a, DriverResult<Value>> {
		Box::pin(async move { Ok(self.execute(script, args, true).await?) })
	}

	fn title(&self) -> BoxFut<'_, DriverResult<String>> {
		Box::pin(async move { Ok(self.get_title().await?) })
	}

	fn set_script_timeout(&self, timeout: Duration) -> BoxFut<'_, DriverResult<()>> {
		Box::pin(async move { Ok(self.script_timeout(timeout).await?) })
	}

	fn quit(self: Box<Self>) -> BoxFut<'static, DriverResult<()>> {
		Box::pin(async move { Ok((*self).delete().await?) })
	}
}

