use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures talking to a WebDriver remote end.
#[derive(Debug, Error)]
pub enum Error {
	#[error("http error: {0}")]
	Http(#[from] reqwest::Error),

	/// The remote end answered with a W3C error body.
	#[error("{error}: {message}")]
	WebDriver { status: u16, error: String, message: String },

	/// The remote end answered with something that is not a W3C envelope.
	#[error("invalid response: {0}")]
	InvalidResponse(String),

	#[error("invalid server address: {0}")]
	Url(#[from] url::ParseError),
}

impl Error {
	/// W3C error code, when the remote end sent one.
	pub fn code(&self) -> Option<&str> {
		match self {
			Error::WebDriver { error, .. } => Some(error),
			_ => None,
		}
	}

	pub fn is_script_timeout(&self) -> bool {
		self.code() == Some("script timeout")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn webdriver_error_displays_code_and_message() {
		let err = Error::WebDriver {
			status: 500,
			error: "javascript error".into(),
			message: "foo is not defined".into(),
		};
		assert_eq!(err.to_string(), "javascript error: foo is not defined");
		assert_eq!(err.code(), Some("javascript error"));
		assert!(!err.is_script_timeout());
	}

	#[test]
	fn only_webdriver_errors_carry_a_code() {
		assert_eq!(Error::InvalidResponse("eof".into()).code(), None);
	}
}
