use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, VerifyError};

use super::model::{ModelShape, PropertyConstraint};

/// A single `owl:Restriction` as declared, before merging and inheritance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RawRestriction {
    pub(super) class_iri: String,
    pub(super) property: String,
    pub(super) min_cardinality: Option<u32>,
    pub(super) max_cardinality: Option<u32>,
    pub(super) range: Option<String>,
}

type PropertyTable = BTreeMap<String, PropertyConstraint>;

pub(super) fn compile_shapes(
    restrictions: &[RawRestriction],
    superclasses: &[(String, String)],
) -> Result<BTreeMap<String, ModelShape>> {
    let mut own = BTreeMap::<String, PropertyTable>::new();
    for restriction in restrictions {
        let class_iri = restriction.class_iri.trim();
        let property = restriction.property.trim();
        if class_iri.is_empty() || property.is_empty() {
            return Err(VerifyError::Ontology(
                "ontology restriction must name a class and a property".to_string(),
            ));
        }
        let entry = own
            .entry(class_iri.to_string())
            .or_default()
            .entry(property.to_string())
            .or_insert_with(|| PropertyConstraint {
                property: property.to_string(),
                ..PropertyConstraint::default()
            });
        merge_restriction(entry, restriction, class_iri)?;
    }

    let mut parents = BTreeMap::<String, Vec<String>>::new();
    for (class_iri, parent) in superclasses {
        if class_iri != parent {
            parents
                .entry(class_iri.clone())
                .or_default()
                .push(parent.clone());
        }
    }
    for list in parents.values_mut() {
        list.sort();
        list.dedup();
    }

    let candidates = own
        .keys()
        .chain(parents.keys())
        .cloned()
        .collect::<BTreeSet<_>>();
    let mut shapes = BTreeMap::new();
    for class_iri in candidates {
        let properties = effective_properties(&class_iri, &own, &parents, &mut Vec::new());
        if properties.is_empty() {
            continue;
        }
        shapes.insert(
            class_iri.clone(),
            ModelShape {
                class_iri,
                properties: properties.into_values().collect(),
            },
        );
    }
    Ok(shapes)
}

fn merge_restriction(
    entry: &mut PropertyConstraint,
    restriction: &RawRestriction,
    class_iri: &str,
) -> Result<()> {
    entry.min_cardinality = match (entry.min_cardinality, restriction.min_cardinality) {
        (Some(current), Some(next)) => Some(current.max(next)),
        (current, next) => current.or(next),
    };
    entry.max_cardinality = match (entry.max_cardinality, restriction.max_cardinality) {
        (Some(current), Some(next)) => Some(current.min(next)),
        (current, next) => current.or(next),
    };
    if entry.range.is_none() {
        entry.range.clone_from(&restriction.range);
    }

    if let (Some(min), Some(max)) = (entry.min_cardinality, entry.max_cardinality)
        && min > max
    {
        return Err(VerifyError::Ontology(format!(
            "ontology class '{class_iri}' property '{}' has min cardinality {min} above max {max}",
            entry.property
        )));
    }
    Ok(())
}

fn effective_properties(
    class_iri: &str,
    own: &BTreeMap<String, PropertyTable>,
    parents: &BTreeMap<String, Vec<String>>,
    path: &mut Vec<String>,
) -> PropertyTable {
    let mut properties = own.get(class_iri).cloned().unwrap_or_default();
    path.push(class_iri.to_string());
    for parent in parents.get(class_iri).into_iter().flatten() {
        if path.iter().any(|seen| seen == parent) {
            continue;
        }
        for (property, inherited) in effective_properties(parent, own, parents, path) {
            properties
                .entry(property)
                .and_modify(|constraint| constraint.inherit_from(&inherited))
                .or_insert(inherited);
        }
    }
    path.pop();
    properties
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restriction(
        class_iri: &str,
        property: &str,
        min: Option<u32>,
        max: Option<u32>,
        range: Option<&str>,
    ) -> RawRestriction {
        RawRestriction {
            class_iri: class_iri.to_string(),
            property: property.to_string(),
            min_cardinality: min,
            max_cardinality: max,
            range: range.map(ToString::to_string),
        }
    }

    #[test]
    fn separate_restrictions_on_one_property_are_merged() {
        let shapes = compile_shapes(
            &[
                restriction("sp:Encounter", "sp:startDate", Some(1), None, None),
                restriction("sp:Encounter", "sp:startDate", None, Some(1), None),
                restriction("sp:Encounter", "sp:type", None, None, Some("sp:EncounterType")),
            ],
            &[],
        )
        .expect("compile");
        let shape = shapes.get("sp:Encounter").expect("shape");
        assert_eq!(shape.properties.len(), 2);
        assert_eq!(shape.properties[0].property, "sp:startDate");
        assert_eq!(shape.properties[0].min_cardinality, Some(1));
        assert_eq!(shape.properties[0].max_cardinality, Some(1));
        assert_eq!(shape.properties[1].range.as_deref(), Some("sp:EncounterType"));
    }

    #[test]
    fn subclasses_inherit_restrictions_and_own_range_wins() {
        let shapes = compile_shapes(
            &[
                restriction("sp:CodedValue", "sp:code", Some(1), Some(1), Some("sp:Code")),
                restriction("sp:EncounterType", "sp:code", None, None, Some("spcode:EncounterType")),
            ],
            &[("sp:EncounterType".to_string(), "sp:CodedValue".to_string())],
        )
        .expect("compile");
        let code = &shapes.get("sp:EncounterType").expect("shape").properties[0];
        assert_eq!(code.min_cardinality, Some(1));
        assert_eq!(code.max_cardinality, Some(1));
        assert_eq!(code.range.as_deref(), Some("spcode:EncounterType"));
    }

    #[test]
    fn classes_without_any_restriction_produce_no_shape() {
        let shapes = compile_shapes(
            &[restriction("sp:A", "sp:p", Some(1), None, None)],
            &[("sp:B".to_string(), "sp:Unrestricted".to_string())],
        )
        .expect("compile");
        assert!(shapes.contains_key("sp:A"));
        assert!(!shapes.contains_key("sp:B"));
    }

    #[test]
    fn cyclic_subclass_declarations_terminate() {
        let shapes = compile_shapes(
            &[restriction("sp:A", "sp:p", Some(1), None, None)],
            &[
                ("sp:A".to_string(), "sp:B".to_string()),
                ("sp:B".to_string(), "sp:A".to_string()),
            ],
        )
        .expect("compile");
        assert_eq!(shapes.get("sp:B").expect("b").properties.len(), 1);
    }

    #[test]
    fn contradictory_bounds_are_rejected() {
        let err = compile_shapes(
            &[
                restriction("sp:A", "sp:p", Some(2), None, None),
                restriction("sp:A", "sp:p", None, Some(1), None),
            ],
            &[],
        )
        .expect_err("must fail");
        assert!(matches!(err, VerifyError::Ontology(_)));
    }
}
