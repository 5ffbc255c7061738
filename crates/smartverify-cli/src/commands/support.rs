use std::io::{Read, Write};
use std::path::Path;
use std::{fs, io};

use anyhow::{Context, Result, bail};

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub(super) fn read_payload(data: Option<&Path>, from_stdin: bool) -> Result<String> {
    match (data, from_stdin) {
        (Some(path), false) => fs::read_to_string(path)
            .with_context(|| format!("failed to read payload file {}", path.display())),
        (None, true) => {
            let mut payload = String::new();
            io::stdin()
                .read_to_string(&mut payload)
                .context("failed to read payload from stdin")?;
            Ok(payload)
        }
        _ => bail!("exactly one of --data or --stdin is required"),
    }
}
