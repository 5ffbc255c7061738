//! Compilation of ontology restrictions into executable validation queries.
//!
//! Every query is tagged with the [`QueryPattern`] that decides how its result
//! set is judged: `Negative` queries must return nothing, `Select` rows must
//! each match one of the embedded constraint rows, and `Singular` result sets
//! must not repeat a row.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ontology::{ConstraintRow, OntologyCatalog, shared_catalog};

mod builder;
mod sparql;

pub use builder::MAX_SHAPE_DEPTH;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueryPattern {
    Negative,
    Select,
    Singular,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationQuery {
    pub pattern: QueryPattern,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ConstraintRow>,
}

impl ValidationQuery {
    #[must_use]
    pub fn negative(text: impl Into<String>) -> Self {
        Self {
            pattern: QueryPattern::Negative,
            text: text.into(),
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn singular(text: impl Into<String>) -> Self {
        Self {
            pattern: QueryPattern::Singular,
            text: text.into(),
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn select(text: impl Into<String>, constraints: Vec<ConstraintRow>) -> Self {
        Self {
            pattern: QueryPattern::Select,
            text: text.into(),
            constraints,
        }
    }
}

/// Queries for `model` against the process-wide ontology catalog.
pub fn get_queries(model: &str) -> Result<Vec<ValidationQuery>> {
    build_queries(shared_catalog()?, model)
}

/// Queries for `model` against an explicit catalog.
///
/// Fails with `VerifyError::UnknownModel` when the catalog declares no
/// restrictions for the model.
pub fn build_queries(catalog: &OntologyCatalog, model: &str) -> Result<Vec<ValidationQuery>> {
    builder::compile_model(catalog, model)
}
