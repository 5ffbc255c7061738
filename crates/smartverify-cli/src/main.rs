mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use smartverify_core::VerifierConfig;
use smartverify_core::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = VerifierConfig::from_env().with_ontology_path(cli.ontology.clone());
    init_tracing(&config);

    let operation = cli.command.operation();
    let model = cli.command.model().map(ToString::to_string);
    match commands::run(&config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::report_error(&err, operation, model);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &VerifierConfig) {
    let filter = EnvFilter::try_new(config.log_filter_or_default())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
