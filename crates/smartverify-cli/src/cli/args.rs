use std::path::PathBuf;

use clap::{ArgGroup, Args};

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("payload").required(true).args(["data", "stdin"])))]
pub struct RunArgs {
    /// Data model name, e.g. `VitalSigns`.
    #[arg(long)]
    pub model: String,
    /// Declared HTTP content type of the payload.
    #[arg(long, default_value = "")]
    pub content_type: String,
    /// Read the payload from a file.
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,
    /// Read the payload from standard input.
    #[arg(long, default_value_t = false)]
    pub stdin: bool,
}

#[derive(Debug, Args)]
pub struct QueriesArgs {
    #[arg(long)]
    pub model: String,
}
