//! Round-robin lane assignment.
//!
//! A [`Lane`] is a shared serialization context. Commands issued on the same
//! lane are ordered relative to each other, even when they target different
//! sessions. [`LanePool`] hands lanes out cyclically and never blocks: it is
//! a traffic-shaping primitive, not a semaphore. Any number of pipelines may
//! hold the same lane at once; only the commands they issue through
//! [`Lane::enter`] are serialized.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::{Error, Result};

/// Handle to one serialization context. Cheap to clone.
#[derive(Clone)]
pub struct Lane {
	id: usize,
	gate: Arc<Mutex<()>>,
}

impl Lane {
	fn new(id: usize) -> Self {
		Self {
			id,
			gate: Arc::new(Mutex::new(())),
		}
	}

	/// Index of this lane inside its pool.
	pub fn id(&self) -> usize {
		self.id
	}

	/// Waits for this lane's turn. Turns are granted in FIFO order and last
	/// until the returned guard is dropped.
	pub async fn enter(&self) -> LaneTurn<'_> {
		LaneTurn {
			_guard: self.gate.lock().await,
		}
	}
}

impl PartialEq for Lane {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.gate, &other.gate)
	}
}

impl Eq for Lane {}

impl fmt::Debug for Lane {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Lane").field("id", &self.id).finish()
	}
}

/// Exclusive turn on a lane; the next command may start once dropped.
pub struct LaneTurn<'a> {
	_guard: MutexGuard<'a, ()>,
}

/// Fixed set of lanes handed out round-robin.
#[derive(Debug)]
pub struct LanePool {
	lanes: Vec<Lane>,
	next: AtomicUsize,
}

impl LanePool {
	/// Creates `size` lanes eagerly.
	///
	/// # Errors
	///
	/// Returns [`Error::Config`] if `size` is zero.
	pub fn new(size: usize) -> Result<Self> {
		if size == 0 {
			return Err(Error::Config("lane count must be at least 1".into()));
		}
		debug!(target: "runjs.lanes", size, "creating lane pool");
		Ok(Self {
			lanes: (0..size).map(Lane::new).collect(),
			next: AtomicUsize::new(0),
		})
	}

	/// Returns the next lane: call `i` yields lane `i mod len()`.
	pub fn acquire(&self) -> Lane {
		let index = self.next.fetch_add(1, Ordering::Relaxed) % self.lanes.len();
		debug!(target: "runjs.lanes", index, "round-robin index");
		self.lanes[index].clone()
	}
}
