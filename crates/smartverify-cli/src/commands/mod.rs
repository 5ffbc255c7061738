use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use smartverify_core::{
    ModelId, OntologyCallDescriptor, OntologyCatalog, ValidationQuery, VerifierConfig, VerifyError,
    build_queries, format, model_for_target, run_with_catalog, verifier_calls,
};
use tracing::debug;

use crate::cli::Commands;

mod support;


use self::support::{print_json, read_payload};

/// One verifiable call, as printed by `smartverify calls`.
#[derive(Debug, Serialize)]
struct CallEntry {
    model: String,
    #[serde(flatten)]
    call: OntologyCallDescriptor,
}

pub(crate) fn run(config: &VerifierConfig, command: Commands) -> Result<()> {
    let catalog = load_catalog(config)?;
    match command {
        Commands::Run(args) => {
            let payload = read_payload(args.data.as_deref(), args.stdin)?;
            let outcome = run_with_catalog(&catalog, &args.model, &payload, &args.content_type);
            print_json(&format(&outcome))?;
        }
        Commands::Queries(args) => {
            print_json(&model_queries(&catalog, &args.model)?)?;
        }
        Commands::Calls => {
            print_json(&call_entries(&catalog))?;
        }
    }
    Ok(())
}

fn load_catalog(config: &VerifierConfig) -> Result<OntologyCatalog> {
    let source = config
        .ontology_path
        .as_deref()
        .map_or_else(|| "bundled".to_string(), |path| path.display().to_string());
    debug!(source = %source, "loading ontology catalog");
    OntologyCatalog::from_config(config)
        .with_context(|| format!("failed to load ontology catalog from {source}"))
}

/// Registered models without a shape have no constraints; other names stay an error.
fn model_queries(catalog: &OntologyCatalog, model: &str) -> Result<Vec<ValidationQuery>> {
    match build_queries(catalog, model) {
        Err(VerifyError::UnknownModel(_)) if ModelId::from_name(model) != ModelId::Unregistered => {
            Ok(Vec::new())
        }
        other => Ok(other?),
    }
}

fn call_entries(catalog: &OntologyCatalog) -> BTreeMap<String, CallEntry> {
    verifier_calls(catalog)
        .into_iter()
        .map(|(target, call)| {
            let entry = CallEntry {
                model: model_for_target(&target),
                call,
            };
            (target, entry)
        })
        .collect()
}

/// Writes the failure as an `ErrorPayload` JSON document on stderr.
pub(crate) fn report_error(err: &anyhow::Error, operation: &str, model: Option<String>) {
    let mut payload = match err.downcast_ref::<VerifyError>() {
        Some(verify) => verify.to_payload(operation, model),
        None => VerifyError::Internal(err.to_string()).to_payload(operation, model),
    };
    payload.message = format!("{err:#}");
    match serde_json::to_string_pretty(&payload) {
        Ok(rendered) => eprintln!("{rendered}"),
        Err(_) => eprintln!("{}: {}", payload.code, payload.message),
    }
}
