use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const SP_NS: &str = "http://smartplatforms.org/terms#";
pub const SP_CODE_CLASS: &str = "http://smartplatforms.org/terms#Code";

/// One API operation declared in the ontology.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct OntologyCallDescriptor {
    pub path: String,
    pub method: String,
    pub target: String,
    pub category: String,
}

/// One permitted code instance for a coded property. Compared case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ConstraintRow {
    pub uri: String,
    pub code: String,
    pub identifier: String,
    pub title: String,
    pub system: String,
}

impl ConstraintRow {
    #[must_use]
    pub fn fields(&self) -> [&str; 5] {
        [
            self.uri.as_str(),
            self.code.as_str(),
            self.identifier.as_str(),
            self.title.as_str(),
            self.system.as_str(),
        ]
    }

    #[must_use]
    pub fn matches_fields(&self, fields: &[String]) -> bool {
        fields.len() == 5
            && self
                .fields()
                .iter()
                .zip(fields)
                .all(|(expected, actual)| expected.to_lowercase() == actual.to_lowercase())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PropertyConstraint {
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cardinality: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cardinality: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

impl PropertyConstraint {
    /// Fills bounds and range this constraint leaves open from `inherited`.
    pub(crate) fn inherit_from(&mut self, inherited: &Self) {
        if self.min_cardinality.is_none() {
            self.min_cardinality = inherited.min_cardinality;
        }
        if self.max_cardinality.is_none() {
            self.max_cardinality = inherited.max_cardinality;
        }
        if self.range.is_none() {
            self.range.clone_from(&inherited.range);
        }
    }
}

/// Effective restrictions of one ontology class, inherited ones included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ModelShape {
    pub class_iri: String,
    pub properties: Vec<PropertyConstraint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OntologyCatalog {
    pub(crate) calls: Vec<OntologyCallDescriptor>,
    pub(crate) shapes: BTreeMap<String, ModelShape>,
    pub(crate) code_tables: BTreeMap<String, Vec<ConstraintRow>>,
}

impl OntologyCatalog {
    #[must_use]
    pub fn calls(&self) -> &[OntologyCallDescriptor] {
        &self.calls
    }

    #[must_use]
    pub fn shape(&self, class_iri: &str) -> Option<&ModelShape> {
        self.shapes.get(class_iri)
    }

    #[must_use]
    pub fn shape_for_model(&self, model: &str) -> Option<&ModelShape> {
        self.shape(&model_class_iri(model))
    }

    #[must_use]
    pub fn is_code_class(&self, class_iri: &str) -> bool {
        self.code_tables.contains_key(class_iri)
    }

    /// Permitted instances of a code class; empty for open or unknown classes.
    #[must_use]
    pub fn code_table(&self, class_iri: &str) -> &[ConstraintRow] {
        self.code_tables
            .get(class_iri)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[must_use]
pub fn model_class_iri(model: &str) -> String {
    format!("{SP_NS}{model}")
}
