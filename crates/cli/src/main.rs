use clap::Parser;
use runjs_cli::{app, cli::Cli, logging, output};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	if let Err(err) = logging::init_logging(cli.verbose, cli.log_filter.as_deref()) {
		output::print_error(&err);
		std::process::exit(1);
	}

	let outcome = match app::run(&cli).await {
		Ok(results) => output::print_results(&results, cli.format),
		Err(err) => Err(err),
	};
	if let Err(err) = outcome {
		output::print_error(&err);
		std::process::exit(1);
	}
}
