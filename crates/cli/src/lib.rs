//! Command-line front end for [`runjs`].

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod styles;
