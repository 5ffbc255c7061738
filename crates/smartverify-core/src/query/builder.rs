use tracing::debug;

use crate::error::{Result, VerifyError};
use crate::ontology::{ModelShape, OntologyCatalog, PropertyConstraint};

use super::ValidationQuery;
use super::sparql::{
    FocusPath, coded_value_query, missing_property_query, presence_query, single_value_query,
    too_few_values_query, too_many_values_query,
};

/// Deepest chain of nested shapes followed from the model class.
pub const MAX_SHAPE_DEPTH: usize = 4;

pub(super) fn compile_model(catalog: &OntologyCatalog, model: &str) -> Result<Vec<ValidationQuery>> {
    let shape = catalog
        .shape_for_model(model)
        .ok_or_else(|| VerifyError::UnknownModel(model.to_string()))?;

    let mut queries = vec![ValidationQuery::negative(presence_query(&shape.class_iri))];
    let mut visited = vec![shape.class_iri.clone()];
    compile_shape(
        catalog,
        shape,
        &FocusPath::new(&shape.class_iri),
        &mut visited,
        &mut queries,
    );

    debug!(model, queries = queries.len(), "compiled validation queries");
    Ok(queries)
}

fn compile_shape(
    catalog: &OntologyCatalog,
    shape: &ModelShape,
    path: &FocusPath,
    visited: &mut Vec<String>,
    queries: &mut Vec<ValidationQuery>,
) {
    for constraint in &shape.properties {
        compile_property(catalog, constraint, path, queries);

        let Some(range) = constraint.range.as_deref() else {
            continue;
        };
        let Some(nested) = catalog.shape(range) else {
            continue;
        };
        if path.depth() + 1 >= MAX_SHAPE_DEPTH || visited.iter().any(|seen| seen == range) {
            continue;
        }
        visited.push(range.to_string());
        compile_shape(
            catalog,
            nested,
            &path.extend(&constraint.property),
            visited,
            queries,
        );
        visited.pop();
    }
}

fn compile_property(
    catalog: &OntologyCatalog,
    constraint: &PropertyConstraint,
    path: &FocusPath,
    queries: &mut Vec<ValidationQuery>,
) {
    let property = constraint.property.as_str();

    match constraint.min_cardinality {
        Some(1) => queries.push(ValidationQuery::negative(missing_property_query(
            path, property,
        ))),
        Some(min) if min > 1 => queries.push(ValidationQuery::negative(too_few_values_query(
            path, property, min,
        ))),
        _ => {}
    }

    match constraint.max_cardinality {
        Some(1) => queries.push(ValidationQuery::singular(single_value_query(path, property))),
        Some(max) => queries.push(ValidationQuery::negative(too_many_values_query(
            path, property, max,
        ))),
        None => {}
    }

    if let Some(range) = constraint.range.as_deref() {
        let table = catalog.code_table(range);
        if !table.is_empty() {
            queries.push(ValidationQuery::select(
                coded_value_query(path, property, range),
                table.to_vec(),
            ));
        }
    }
}
