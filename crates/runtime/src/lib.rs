//! W3C WebDriver sessions over HTTP.
//!
//! [`WebDriverBuilder`] implements [`runjs::SessionBuilder`] against any
//! remote end speaking the W3C protocol: chromedriver, geckodriver,
//! msedgedriver, safaridriver or a Selenium grid.
//!
//! ```ignore
//! let builder = WebDriverBuilder::new()?.with_default_server("http://127.0.0.1:9515")?;
//! let runner = ScriptRunner::new(options, Arc::new(builder))?;
//! ```

mod client;
pub mod error;
mod session;

pub use error::{Error, Result};
pub use session::{DEFAULT_COMMAND_TIMEOUT, DEFAULT_SERVER, WebDriverBuilder, WebDriverSession};
