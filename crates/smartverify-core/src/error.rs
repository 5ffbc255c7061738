use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, VerifyError>;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("ontology error: {0}")]
    Ontology(String),

    #[error("unsupported query form: {0}")]
    UnsupportedQuery(String),

    #[error(transparent)]
    Evaluation(#[from] oxigraph::sparql::EvaluationError),

    #[error(transparent)]
    Storage(#[from] oxigraph::store::StorageError),

    #[error(transparent)]
    Loader(#[from] oxigraph::store::LoaderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure to read a payload under its declared kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("RDF-XML parsing failed: {0}")]
    Rdf(String),

    #[error("JSON parsing failed: {0}")]
    Json(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl VerifyError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownModel(_) => "UNKNOWN_MODEL",
            Self::Ontology(_) => "ONTOLOGY_ERROR",
            Self::UnsupportedQuery(_) => "UNSUPPORTED_QUERY",
            Self::Evaluation(_) => "QUERY_EVALUATION_ERROR",
            Self::Storage(_) => "GRAPH_STORAGE_ERROR",
            Self::Loader(_) => "GRAPH_LOADER_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_payload(&self, operation: impl Into<String>, model: Option<String>) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
            model,
        }
    }
}
