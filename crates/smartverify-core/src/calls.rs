use std::collections::BTreeMap;

use crate::ontology::{OntologyCallDescriptor, OntologyCatalog, SP_NS};

const RECORD_ITEMS_CATEGORY: &str = "record_items";
const EXTRA_PATHS: [&str; 3] = ["/ontology", "/apps/manifests/", "/capabilities/"];

/// GET calls whose responses can be verified, keyed by target IRI.
///
/// Record-item reads plus the ontology, manifest and capability documents.
/// A later call with the same target replaces an earlier one.
#[must_use]
pub fn verifier_calls(catalog: &OntologyCatalog) -> BTreeMap<String, OntologyCallDescriptor> {
    catalog
        .calls()
        .iter()
        .filter(|call| call.method == "GET")
        .filter(|call| {
            call.category == RECORD_ITEMS_CATEGORY || EXTRA_PATHS.contains(&call.path.as_str())
        })
        .map(|call| (call.target.clone(), call.clone()))
        .collect()
}

/// Registry model name for a call target: the IRI without the `sp:` namespace.
#[must_use]
pub fn model_for_target(target: &str) -> String {
    target.strip_prefix(SP_NS).unwrap_or(target).to_string()
}
