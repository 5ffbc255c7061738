// Public fallible APIs in this crate share one concrete error contract (`VerifyError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod calls;
pub mod checks;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod ontology;
pub mod query;
pub mod registry;
pub mod report;
pub mod runner;

pub use calls::{model_for_target, verifier_calls};
pub use config::VerifierConfig;
pub use engine::{evaluate, evaluate_model};
pub use error::{ErrorPayload, ParseError, Result, VerifyError};
pub use graph::{QueryRow, RdfGraph};
pub use ontology::{ConstraintRow, OntologyCallDescriptor, OntologyCatalog, shared_catalog};
pub use query::{QueryPattern, ValidationQuery, build_queries, get_queries};
pub use registry::ModelId;
pub use report::{CheckRecord, Outcome, format};
pub use runner::{RunContext, run, run_with_catalog};
