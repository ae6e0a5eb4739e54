//! One CLI invocation: build the runner, wire Ctrl-C, run.

use std::sync::Arc;
use std::time::Duration;

use runjs::{ExecutionResult, PlanLoader, ScriptRunner};
use runjs_runtime::WebDriverBuilder;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::error::Result;

/// Runs the script described by `cli` and returns the result vector.
///
/// Configuration is validated before the script is read, so a bad flag never
/// waits on stdin.
pub async fn run(cli: &Cli) -> Result<Vec<ExecutionResult>> {
	let options = cli.run_options()?;
	let builder = WebDriverBuilder::with_command_timeout(Duration::from_secs(cli.command_timeout))?;
	let mut runner = ScriptRunner::new(options, Arc::new(builder))?;
	if let Some(dir) = &cli.navigation_dir {
		runner = runner.with_navigation_loader(Arc::new(PlanLoader::with_base_dir(dir)));
	}

	let targets = cli.all_targets()?;
	let script = cli.read_script().await?;

	let abort = runner.abort_handle();
	let listener = tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			warn!(target: "runjs.cli", "interrupted, aborting remaining steps");
			abort.abort();
		}
	});

	let results = runner.run(&script, &targets).await;
	listener.abort();

	if runner.is_aborted() {
		info!(target: "runjs.cli", "run was aborted");
	}
	Ok(results)
}
