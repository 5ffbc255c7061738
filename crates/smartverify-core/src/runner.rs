use std::cell::OnceCell;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use tracing::{info, warn};

use crate::checks::{Verdict, parse_json, parse_rdf};
use crate::error::{ParseError, Result};
use crate::graph::RdfGraph;
use crate::ontology::{OntologyCatalog, shared_catalog};
use crate::registry::ModelId;
use crate::report::{ASSERTION_MARKER, CheckRecord, Outcome};

static RUN_GATE: Mutex<()> = Mutex::new(());

/// Inputs of one validation run, with payload parses memoized per run.
pub struct RunContext<'a> {
    model: &'a str,
    payload: &'a str,
    content_type: &'a str,
    catalog: Option<&'a OntologyCatalog>,
    rdf: OnceCell<std::result::Result<RdfGraph, ParseError>>,
    json: OnceCell<std::result::Result<Value, ParseError>>,
}

impl<'a> RunContext<'a> {
    #[must_use]
    pub fn new(model: &'a str, payload: &'a str, content_type: &'a str) -> Self {
        Self {
            model,
            payload,
            content_type,
            catalog: None,
            rdf: OnceCell::new(),
            json: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: &'a OntologyCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn model(&self) -> &'a str {
        self.model
    }

    pub fn payload(&self) -> &'a str {
        self.payload
    }

    pub fn content_type(&self) -> &'a str {
        self.content_type
    }

    /// The explicit catalog, or the process-wide one.
    pub fn catalog(&self) -> Result<&'a OntologyCatalog> {
        match self.catalog {
            Some(catalog) => Ok(catalog),
            None => shared_catalog(),
        }
    }

    pub fn rdf(&self) -> &std::result::Result<RdfGraph, ParseError> {
        self.rdf.get_or_init(|| parse_rdf(self.payload))
    }

    pub fn json(&self) -> &std::result::Result<Value, ParseError> {
        self.json.get_or_init(|| parse_json(self.payload))
    }
}

/// Validates `payload` as `model` against the process-wide ontology.
///
/// Never fails: parse problems, mismatches and structural violations are
/// failures, engine faults are errors.
pub fn run(model: &str, payload: &str, content_type: &str) -> Outcome {
    execute(RunContext::new(model, payload, content_type))
}

pub fn run_with_catalog(
    catalog: &OntologyCatalog,
    model: &str,
    payload: &str,
    content_type: &str,
) -> Outcome {
    execute(RunContext::new(model, payload, content_type).with_catalog(catalog))
}

fn execute(ctx: RunContext<'_>) -> Outcome {
    let _gate = RUN_GATE.lock().unwrap_or_else(PoisonError::into_inner);

    let mut outcome = Outcome {
        model: ctx.model().to_string(),
        ..Outcome::default()
    };
    for check in ModelId::from_name(ctx.model()).pipeline() {
        match check.run(&ctx) {
            Ok(Verdict::Pass) => {}
            Ok(Verdict::Fail(detail)) => outcome.failures.push(CheckRecord {
                check: check.name().to_string(),
                message: format!("{ASSERTION_MARKER}{detail}"),
            }),
            Err(err) => {
                warn!(
                    model = ctx.model(),
                    check = check.name(),
                    code = err.code(),
                    error = %err,
                    "check raised an engine error"
                );
                outcome.errors.push(CheckRecord {
                    check: check.name().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        model = ctx.model(),
        failures = outcome.failures.len(),
        errors = outcome.errors.len(),
        "validation run finished"
    );
    outcome
}
