//! CLI entrypoint for `apdu-gen`.

use apdu_gen::cli::Args;
use apdu_gen::config::load_config;
use apdu_gen::error::GenError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<(), GenError> {
    let args = Args::parse();
    let config = load_config(&args.overrides(), args.config.as_deref())?;
    apdu_gen::run(&config, &args.destinations)
}

/// Logs go to stderr so generated output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
