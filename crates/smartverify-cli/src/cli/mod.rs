use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;


pub use args::{QueriesArgs, RunArgs};

#[derive(Debug, Parser)]
#[command(name = "smartverify")]
#[command(about = "Ontology-driven verifier for SMART API payloads", version)]
pub struct Cli {
    /// Ontology document to use instead of the bundled one.
    #[arg(long, global = true, value_name = "PATH")]
    pub ontology: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate one payload and print the failure messages.
    Run(RunArgs),
    /// Print the validation queries compiled for a model.
    Queries(QueriesArgs),
    /// Print the API calls whose responses can be verified.
    Calls,
}

impl Commands {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Run(_) => "run",
            Self::Queries(_) => "queries",
            Self::Calls => "calls",
        }
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Run(args) => Some(&args.model),
            Self::Queries(args) => Some(&args.model),
            Self::Calls => None,
        }
    }
}
