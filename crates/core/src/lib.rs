//! Fan one script out across many browser sessions.
//!
//! [`ScriptRunner`] takes a script payload and a list of targets, starts one
//! pipeline per target and returns one
//! [`ExecutionResult`] per target, in input order, once every pipeline has
//! settled. Individual failures never fail the run; they are recorded in the
//! corresponding result.
//!
//! The remote session driver is abstracted behind [`SessionBuilder`] and
//! [`Session`]; `runjs-runtime` provides a W3C WebDriver implementation.
//!
//! # Example
//!
//! ```ignore
//! let builder = Arc::new(WebDriverBuilder::new()?);
//! let runner = ScriptRunner::new(RunOptions::default(), builder)?;
//! let results = runner.run("return document.title;", &targets).await;
//! ```

pub mod abort;
pub mod error;
pub mod lanes;
pub mod navigation;
pub mod options;
pub mod pipeline;
pub mod provider;
pub mod result;
pub mod runner;
pub mod session;
pub mod target;

pub use abort::{AbortController, AbortHandle};
pub use error::{Error, Result};
pub use lanes::{Lane, LanePool, LaneTurn};
pub use navigation::{NavigationPlan, NavigationStep, PlanLoader};
pub use options::{ExecutionMode, RunOptions};
pub use provider::Provider;
pub use result::ExecutionResult;
pub use runner::ScriptRunner;
pub use session::{
	BoxFut, Capabilities, DriverError, DriverResult, NavigationLoader, NavigationModule, Session,
	SessionBuilder, SessionRequest,
};
pub use target::{NavigationAction, Target};
