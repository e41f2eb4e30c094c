use anyhow::{Context, Result};
use clap::Parser;
use fc_compare::Options;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let options = Options::from(args::Cli::parse());
	debug!(?options, "Starting comparison");

	let report = fc_compare::run(&options).context("factory comparison failed")?;

	print!("{}", report.render());

	Ok(())
}
