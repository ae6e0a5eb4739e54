//! The orchestrator.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info};

use crate::abort::{AbortController, AbortHandle};
use crate::error::Result;
use crate::lanes::LanePool;
use crate::navigation::PlanLoader;
use crate::options::RunOptions;
use crate::pipeline::{Pipeline, PipelineContext};
use crate::provider::Provider;
use crate::result::ExecutionResult;
use crate::session::{Capabilities, NavigationLoader, SessionBuilder};

/// Runs one script against many targets.
///
/// A runner owns its options, lane pool and abort flag for its whole
/// lifetime and may be used for several [`run`](Self::run) calls. Once
/// aborted it stays aborted; create a new runner to run again.
pub struct ScriptRunner {
	options: RunOptions,
	provider: &'static Provider,
	capabilities: Capabilities,
	lanes: LanePool,
	abort: AbortController,
	builder: Arc<dyn SessionBuilder>,
	loader: Arc<dyn NavigationLoader>,
}

impl ScriptRunner {
	/// Validates `options` and prepares the lane pool and capabilities.
	///
	/// Navigation modules are loaded with [`PlanLoader`] unless replaced via
	/// [`with_navigation_loader`](Self::with_navigation_loader).
	///
	/// # Errors
	///
	/// Returns [`Error::Config`](crate::Error::Config) for a zero lane count
	/// or an unknown provider.
	pub fn new(options: RunOptions, builder: Arc<dyn SessionBuilder>) -> Result<Self> {
		let provider = options.validate()?;
		let lanes = LanePool::new(options.concurrency)?;
		let capabilities = provider.capabilities(options.provider_options.as_ref());
		debug!(
			target: "runjs.runner",
			provider = provider.name(),
			server = options.server.as_deref().unwrap_or("<default>"),
			concurrency = options.concurrency,
			mode = ?options.mode,
			"created runner"
		);

		Ok(Self {
			options,
			provider,
			capabilities,
			lanes,
			abort: AbortController::new(),
			builder,
			loader: Arc::new(PlanLoader::default()),
		})
	}

	/// Replaces the navigation-module loader.
	pub fn with_navigation_loader(mut self, loader: Arc<dyn NavigationLoader>) -> Self {
		self.loader = loader;
		self
	}

	/// Runs `script` against every target concurrently.
	///
	/// Returns one result per target, in input order, after every pipeline
	/// has settled. Never fails as a whole.
	pub async fn run<S: AsRef<str>>(&self, script: &str, targets: &[S]) -> Vec<ExecutionResult> {
		if targets.is_empty() {
			return Vec::new();
		}
		info!(target: "runjs.runner", targets = targets.len(), "running script");
		debug!(target: "runjs.runner", "<<EOS\n{script}EOS");

		let ctx = PipelineContext {
			options: &self.options,
			provider: self.provider,
			capabilities: &self.capabilities,
			builder: self.builder.as_ref(),
			loader: self.loader.as_ref(),
			abort: &self.abort,
		};
		let pipelines = targets
			.iter()
			.map(|raw| Pipeline::new(ctx, raw.as_ref(), self.lanes.acquire()).run(script));

		let results = join_all(pipelines).await;

		let failed = results.iter().filter(|r| !r.is_ok()).count();
		info!(target: "runjs.runner", total = results.len(), failed, "run finished");
		results
	}

	/// Stops every pipeline before its next step. Safe to call at any time.
	pub fn abort(&self) {
		self.abort.signal();
	}

	pub fn is_aborted(&self) -> bool {
		self.abort.is_aborted()
	}

	/// Handle for aborting from another task, e.g. a Ctrl-C listener.
	pub fn abort_handle(&self) -> AbortHandle {
		self.abort.handle()
	}
}
