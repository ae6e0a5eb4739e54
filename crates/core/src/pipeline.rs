//! Per-target state machine.
//!
//! ```text
//! Created -> Prepared -> Navigated -> TitleFetched -> Executed -> Released -> Done
//! ```
//!
//! The target is classified as soon as the session exists, before any abort
//! check. Each transition up to `Executed` starts with an abort check. The first
//! failing step, abort included, skips straight to `Released`; release is
//! attempted exactly once and its errors are discarded.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::abort::AbortController;
use crate::error::{Error, Result};
use crate::lanes::Lane;
use crate::options::{ExecutionMode, RunOptions};
use crate::provider::Provider;
use crate::result::ExecutionResult;
use crate::session::{Capabilities, NavigationLoader, Session, SessionBuilder, SessionRequest};
use crate::target::{NavigationAction, Target};

/// Prefix that exposes the positional script arguments as `ARGS`.
pub const ARGS_PRELUDE: &str = "const ARGS = arguments;\n";

/// Returns the payload sent to every session for `script`.
pub fn wrap_script(script: &str) -> String {
	format!("{ARGS_PRELUDE}{script}")
}

/// Lifecycle position of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum PipelineState {
	/// Not started, or session creation failed.
	Pending,
	Created,
	Prepared,
	Navigated,
	TitleFetched,
	Executed,
	Released,
	Done,
}

impl fmt::Display for PipelineState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			PipelineState::Pending => "pending",
			PipelineState::Created => "created",
			PipelineState::Prepared => "prepared",
			PipelineState::Navigated => "navigated",
			PipelineState::TitleFetched => "title_fetched",
			PipelineState::Executed => "executed",
			PipelineState::Released => "released",
			PipelineState::Done => "done",
		};
		f.write_str(name)
	}
}

/// Run-wide state every pipeline reads.
#[derive(Clone, Copy)]
pub(crate) struct PipelineContext<'r> {
	pub(crate) options: &'r RunOptions,
	pub(crate) provider: &'r Provider,
	pub(crate) capabilities: &'r Capabilities,
	pub(crate) builder: &'r dyn SessionBuilder,
	pub(crate) loader: &'r dyn NavigationLoader,
	pub(crate) abort: &'r AbortController,
}

/// Lifecycle of one target. Single use: [`Pipeline::run`] consumes it.
pub(crate) struct Pipeline<'r> {
	ctx: PipelineContext<'r>,
	raw: String,
	target: Target,
	lane: Lane,
	state: PipelineState,
}

impl<'r> Pipeline<'r> {
	pub(crate) fn new(ctx: PipelineContext<'r>, raw: impl Into<String>, lane: Lane) -> Self {
		let raw = raw.into();
		let target = Target::parse(&raw);
		Self {
			ctx,
			raw,
			target,
			lane,
			state: PipelineState::Pending,
		}
	}

	/// Runs the whole lifecycle and returns the result record. Never fails.
	pub(crate) async fn run(mut self, script: &str) -> ExecutionResult {
		let mut record = ExecutionResult::new(&self.raw, self.ctx.provider.name());

		let request = SessionRequest {
			provider: self.ctx.provider.name(),
			server: self.ctx.options.server.as_deref(),
			capabilities: self.ctx.capabilities,
			lane: self.lane.clone(),
		};
		let session = match self.ctx.builder.build(request).await {
			Ok(session) => session,
			Err(e) => {
				let err = Error::SessionCreate(e);
				debug!(target: "runjs.pipeline", uri = %self.raw, error = %err, "failed");
				record.fail(&err);
				self.state = PipelineState::Done;
				return record;
			}
		};
		self.advance(PipelineState::Created);

		match self.drive(session.as_ref(), script, &mut record).await {
			Ok(value) => {
				debug!(target: "runjs.pipeline", uri = %self.raw, "done");
				record.succeed(value);
			}
			Err(err) => {
				debug!(
					target: "runjs.pipeline",
					uri = %self.raw,
					state = %self.state,
					error = %err,
					"failed"
				);
				record.fail(&err);
			}
		}

		debug!(target: "runjs.pipeline", uri = %self.raw, "quit");
		if let Err(e) = session.quit().await {
			debug!(target: "runjs.pipeline", uri = %self.raw, error = %e, "ignoring quit error");
		}
		self.advance(PipelineState::Released);
		self.advance(PipelineState::Done);
		record
	}

	async fn drive(
		&mut self,
		session: &dyn Session,
		script: &str,
		record: &mut ExecutionResult,
	) -> Result<Value> {
		// Classified before any abort check or session command.
		let action = self.target.action()?;

		self.ctx.abort.check()?;
		self.prepare(session).await?;
		self.advance(PipelineState::Prepared);

		self.ctx.abort.check()?;
		debug!(target: "runjs.pipeline", uri = %self.raw, "start navigation...");
		self.navigate(session, action).await?;
		self.advance(PipelineState::Navigated);

		self.ctx.abort.check()?;
		let title = session.title().await.map_err(Error::Metadata)?;
		record.title = Some(title);
		self.advance(PipelineState::TitleFetched);

		self.ctx.abort.check()?;
		debug!(target: "runjs.pipeline", uri = %self.raw, "end navigation, then run the script...");
		let value = self.execute(session, script).await?;
		self.advance(PipelineState::Executed);
		Ok(value)
	}

	async fn prepare(&self, session: &dyn Session) -> Result<()> {
		if self.ctx.options.is_async() {
			session
				.set_script_timeout(self.ctx.options.script_timeout)
				.await
				.map_err(Error::Prepare)?;
		}
		Ok(())
	}

	async fn navigate(&self, session: &dyn Session, action: NavigationAction) -> Result<()> {
		match action {
			NavigationAction::Stay => Ok(()),
			NavigationAction::Load(url) => session.navigate(&url).await.map_err(|source| Error::Navigation {
				target: self.raw.clone(),
				source,
			}),
			NavigationAction::RunModule(path) => {
				let module = self.ctx.loader.load(&path).await?;
				module.navigate(session).await.map_err(|source| Error::Navigation {
					target: self.raw.clone(),
					source,
				})
			}
		}
	}

	async fn execute(&self, session: &dyn Session, script: &str) -> Result<Value> {
		let payload = wrap_script(script);
		let args = &self.ctx.options.script_args;
		let value = match self.ctx.options.mode {
			ExecutionMode::Sync => session.execute_script(&payload, args).await,
			ExecutionMode::Async => session.execute_async_script(&payload, args).await,
		};
		value.map_err(Error::Script)
	}

	fn advance(&mut self, next: PipelineState) {
		debug_assert!(next > self.state, "pipeline moved backwards: {} -> {next}", self.state);
		self.state = next;
	}
}
