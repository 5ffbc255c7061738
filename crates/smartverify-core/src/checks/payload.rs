use serde_json::Value;

use crate::error::ParseError;
use crate::graph::RdfGraph;

pub const RDF_MIME: &str = "application/rdf+xml";
pub const JSON_MIME: &str = "application/json";

pub fn parse_rdf(payload: &str) -> Result<RdfGraph, ParseError> {
    RdfGraph::parse_rdf_xml(payload)
}

pub fn parse_json(payload: &str) -> Result<Value, ParseError> {
    serde_json::from_str(payload).map_err(|err| ParseError::Json(err.to_string()))
}

/// `null`, `false`, zero, and empty strings, arrays, or objects.
#[must_use]
pub fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
