//! JSON-over-HTTP command transport.

use reqwest::{Method, StatusCode};
use runjs_protocol::{Envelope, ErrorValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;

use crate::error::{Error, Result};

/// Sends commands to one remote end.
#[derive(Debug, Clone)]
pub(crate) struct Client {
	http: reqwest::Client,
	base: String,
}

impl Client {
	pub(crate) fn new(http: reqwest::Client, server: &Url) -> Self {
		Self {
			http,
			base: server.as_str().trim_end_matches('/').to_string(),
		}
	}

	pub(crate) fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.base, path.trim_start_matches('/'))
	}

	pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		self.send(Method::GET, path, None::<&()>).await
	}

	pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
		self.send(Method::POST, path, Some(body)).await
	}

	pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		self.send(Method::DELETE, path, None::<&()>).await
	}

	async fn send<B: Serialize, T: DeserializeOwned>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
	) -> Result<T> {
		let url = self.endpoint(path);
		trace!(target: "runjs.webdriver", %method, %url, "send");

		let mut request = self.http.request(method, &url);
		if let Some(body) = body {
			request = request.json(body);
		}
		let response = request.send().await?;
		let status = response.status();
		let bytes = response.bytes().await?;
		trace!(target: "runjs.webdriver", %url, status = status.as_u16(), len = bytes.len(), "recv");

		decode(status, &bytes)
	}
}

fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
	if status.is_success() {
		return serde_json::from_slice::<Envelope<T>>(body)
			.map(|env| env.value)
			.map_err(|e| Error::InvalidResponse(format!("{status}: {e}")));
	}
	match serde_json::from_slice::<Envelope<ErrorValue>>(body) {
		Ok(env) => Err(Error::WebDriver {
			status: status.as_u16(),
			error: env.value.error,
			message: env.value.message,
		}),
		Err(_) => Err(Error::InvalidResponse(format!(
			"{status}: {}",
			String::from_utf8_lossy(body).trim()
		))),
	}
}
