//! Cooperative cancellation.
//!
//! Preemptively cancelling an in-flight WebDriver command can leave the
//! browser behind after `quit`, so aborting only stops new work: each
//! pipeline step checks the flag before it starts and fails with
//! [`Error::Aborted`] once it is set. Commands already sent are left to
//! finish.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::error::{Error, Result};

/// Write-once stop flag owned by one runner.
#[derive(Debug, Default)]
pub struct AbortController {
	flag: Arc<AtomicBool>,
}

impl AbortController {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the flag. Idempotent; the flag is never cleared.
	pub fn signal(&self) {
		if !self.flag.swap(true, Ordering::SeqCst) {
			debug!(target: "runjs.runner", "abort");
		}
	}

	/// Returns the current state of the flag.
	pub fn is_aborted(&self) -> bool {
		self.flag.load(Ordering::SeqCst)
	}

	/// Fails with [`Error::Aborted`] if the flag is set.
	pub fn check(&self) -> Result<()> {
		if self.is_aborted() {
			return Err(Error::Aborted);
		}
		Ok(())
	}

	/// Returns a handle that can signal this controller from another task.
	pub fn handle(&self) -> AbortHandle {
		AbortHandle {
			flag: Arc::clone(&self.flag),
		}
	}
}

/// Clonable, `Send` handle that signals an [`AbortController`].
#[derive(Debug, Clone)]
pub struct AbortHandle {
	flag: Arc<AtomicBool>,
}

impl AbortHandle {
	pub fn abort(&self) {
		if !self.flag.swap(true, Ordering::SeqCst) {
			debug!(target: "runjs.runner", "abort (via handle)");
		}
	}

	pub fn is_aborted(&self) -> bool {
		self.flag.load(Ordering::SeqCst)
	}
}
