//! Wire types for the W3C WebDriver protocol.
//!
//! This crate contains the serde-serializable request and response bodies
//! exchanged with a WebDriver server (chromedriver, geckodriver, Selenium
//! Grid, ...). They are the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization
//! - **1:1 with protocol**: Match the W3C WebDriver specification
//! - **Stable**: Changes only when the wire protocol changes
//!
//! The session client built on these types lives in `runjs-runtime`.

pub mod command;
pub mod response;
pub mod session;

pub use command::*;
pub use response::*;
pub use session::*;
