//! Judging of compiled validation queries against a parsed graph.

use std::collections::HashSet;

use crate::error::{Result, VerifyError};
use crate::graph::{QueryRow, RdfGraph};
use crate::ontology::{ConstraintRow, OntologyCatalog};
use crate::query::{QueryPattern, ValidationQuery, build_queries};

pub const STRUCTURE_FAILURE_HEADER: &str = "RDF structure check failed\n";
pub const MAX_REPORTED_ROWS: usize = 3;

/// Runs `queries` in order and returns the concatenated failure text.
///
/// An empty string means every query passed. The header is written once,
/// ahead of the first failing block.
pub fn evaluate(graph: &RdfGraph, queries: &[ValidationQuery]) -> Result<String> {
    let mut message = String::new();
    for query in queries {
        let rows = graph.select(&query.text)?;
        let block = match query.pattern {
            QueryPattern::Negative => judge_negative(&rows),
            QueryPattern::Select => judge_select(&rows, &query.constraints)?,
            QueryPattern::Singular => judge_singular(&rows),
        };
        let Some(reported) = block else {
            continue;
        };
        if message.is_empty() {
            message.push_str(STRUCTURE_FAILURE_HEADER);
        }
        message.push_str(&failure_block(query.pattern, &reported, &query.text));
    }
    Ok(message)
}

/// Compiles and judges the queries for `model`.
///
/// A model without constraints in the catalog has nothing to violate.
pub fn evaluate_model(graph: &RdfGraph, catalog: &OntologyCatalog, model: &str) -> Result<String> {
    match build_queries(catalog, model) {
        Ok(queries) => evaluate(graph, &queries),
        Err(VerifyError::UnknownModel(_)) => Ok(String::new()),
        Err(err) => Err(err),
    }
}

fn judge_negative(rows: &[QueryRow]) -> Option<Vec<String>> {
    let shown = rows
        .iter()
        .take(MAX_REPORTED_ROWS)
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    (!shown.is_empty()).then_some(shown)
}

fn judge_select(rows: &[QueryRow], constraints: &[ConstraintRow]) -> Result<Option<Vec<String>>> {
    let mut unmatched = Vec::new();
    for row in rows {
        if row.len() != 5 {
            return Err(VerifyError::UnsupportedQuery(format!(
                "select-pattern query must project 5 columns, got {}",
                row.len()
            )));
        }
        let fields = row.texts();
        let matched = constraints
            .iter()
            .any(|constraint| constraint.matches_fields(&fields));
        if !matched && unmatched.len() < MAX_REPORTED_ROWS {
            unmatched.push(fields.join(" "));
        }
    }
    Ok((!unmatched.is_empty()).then_some(unmatched))
}

fn judge_singular(rows: &[QueryRow]) -> Option<Vec<String>> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for rendered in rows.iter().map(ToString::to_string) {
        if seen.contains(&rendered) {
            if duplicates.len() < MAX_REPORTED_ROWS {
                duplicates.push(rendered);
            }
        } else {
            seen.insert(rendered);
        }
    }
    (!duplicates.is_empty()).then_some(duplicates)
}

fn failure_block(pattern: QueryPattern, reported: &[String], query: &str) -> String {
    match pattern {
        QueryPattern::Negative => format!(
            "Got unexpected results (first {MAX_REPORTED_ROWS} shown) {reported:?} from the query:\n{query}\n"
        ),
        QueryPattern::Select => format!(
            "Got invalid results (first {MAX_REPORTED_ROWS} shown) {reported:?} from the query:\n{query}\n"
        ),
        QueryPattern::Singular => format!(
            "Got unexpected duplicates (first {MAX_REPORTED_ROWS} shown) {reported:?} in the results from the query:\n{query}\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dcterms="http://purl.org/dc/terms/"
         xmlns:sp="http://smartplatforms.org/terms#">
  <sp:Problem rdf:about="http://example.org/problems/1">
    <sp:problemName>Asthma</sp:problemName>
    <sp:problemName>Reactive airway disease</sp:problemName>
  </sp:Problem>
  <sp:Problem rdf:about="http://example.org/problems/2">
    <sp:problemName>Gout</sp:problemName>
  </sp:Problem>
  <sp:Problem rdf:about="http://example.org/problems/3"/>
</rdf:RDF>"#;

    const NAMES: &str = "PREFIX sp: <http://smartplatforms.org/terms#>
SELECT ?p WHERE { ?p sp:problemName ?name }";

    fn graph() -> RdfGraph {
        RdfGraph::parse_rdf_xml(DOC).expect("parse")
    }

    fn row(values: [&str; 5]) -> ConstraintRow {
        ConstraintRow {
            uri: values[0].to_string(),
            code: values[1].to_string(),
            identifier: values[2].to_string(),
            title: values[3].to_string(),
            system: values[4].to_string(),
        }
    }

    fn literal_select(values: [&str; 5]) -> String {
        format!(
            "SELECT ?uri ?code ?identifier ?title ?system WHERE {{
  VALUES (?uri ?code ?identifier ?title ?system) {{ (\"{}\" \"{}\" \"{}\" \"{}\" \"{}\") }}
}}",
            values[0], values[1], values[2], values[3], values[4]
        )
    }

    #[test]
    fn empty_negative_result_passes() {
        let queries = vec![ValidationQuery::negative(
            "SELECT ?s WHERE { ?s <http://example.org/absent> ?o }",
        )];
        assert_eq!(evaluate(&graph(), &queries).expect("evaluate"), "");
    }

    #[test]
    fn negative_rows_are_capped_at_three_and_carry_the_query() {
        let query = "SELECT ?s ?p WHERE { ?s ?p ?o }";
        let message = evaluate(&graph(), &[ValidationQuery::negative(query)]).expect("evaluate");
        assert!(message.starts_with(STRUCTURE_FAILURE_HEADER));
        assert!(message.contains("Got unexpected results (first 3 shown) [\"("));
        assert!(message.ends_with(&format!(" from the query:\n{query}\n")));
        assert_eq!(message.matches("\", \"").count(), 2);
    }

    #[test]
    fn header_is_written_once_for_several_failing_queries() {
        let queries = vec![
            ValidationQuery::negative(NAMES),
            ValidationQuery::singular(NAMES),
        ];
        let message = evaluate(&graph(), &queries).expect("evaluate");
        assert_eq!(message.matches("RDF structure check failed").count(), 1);
        assert!(message.contains("Got unexpected results"));
        assert!(message.contains(
            "Got unexpected duplicates (first 3 shown) [\"(http://example.org/problems/1)\"] in the results from the query:"
        ));
    }

    #[test]
    fn singular_accepts_the_first_occurrence_of_each_row() {
        let query = "PREFIX sp: <http://smartplatforms.org/terms#>
SELECT ?p WHERE { ?p sp:problemName ?name FILTER(?p != <http://example.org/problems/1>) }";
        assert_eq!(
            evaluate(&graph(), &[ValidationQuery::singular(query)]).expect("evaluate"),
            ""
        );
    }

    #[test]
    fn singular_reports_every_repeat_up_to_three() {
        let query = "SELECT ?x WHERE { VALUES ?x { 1 1 1 1 1 2 2 } }";
        let message = evaluate(&graph(), &[ValidationQuery::singular(query)]).expect("evaluate");
        assert!(message.contains("[\"(1)\", \"(1)\", \"(1)\"]"));
    }

    #[test]
    fn select_rows_match_any_constraint_and_list_unmatched_rows() {
        let values = ["u", "c", "i", "t", "s"];
        let query = literal_select(values);

        let pass = ValidationQuery::select(
            query.clone(),
            vec![row(["x", "x", "x", "x", "x"]), row(["U", "C", "I", "T", "S"])],
        );
        assert_eq!(evaluate(&graph(), &[pass]).expect("evaluate"), "");

        let fail = ValidationQuery::select(query.clone(), vec![row(["u", "c", "i", "t", "x"])]);
        let message = evaluate(&graph(), &[fail]).expect("evaluate");
        assert!(message.contains("Got invalid results (first 3 shown) [\"u c i t s\"] from the query:"));
    }

    #[test]
    fn select_with_wrong_arity_is_an_engine_error() {
        let query = ValidationQuery::select(NAMES, Vec::new());
        let err = evaluate(&graph(), &[query]).expect_err("arity");
        assert!(matches!(err, VerifyError::UnsupportedQuery(_)));
    }

    #[test]
    fn malformed_query_is_an_engine_error() {
        let err = evaluate(&graph(), &[ValidationQuery::negative("SELECT WHERE {")])
            .expect_err("syntax");
        assert!(matches!(err, VerifyError::Evaluation(_)));
    }

    #[test]
    fn unknown_model_has_nothing_to_violate() {
        let catalog = OntologyCatalog::default();
        assert_eq!(
            evaluate_model(&graph(), &catalog, "Problem").expect("evaluate"),
            ""
        );
    }

    proptest! {
        #[test]
        fn select_matching_ignores_case(
            values in proptest::array::uniform5("[a-z]{1,8}"),
            upper in proptest::array::uniform5(any::<bool>()),
        ) {
            let recased: Vec<String> = values
                .iter()
                .zip(upper)
                .map(|(value, upper)| if upper { value.to_uppercase() } else { value.clone() })
                .collect();
            let constraint = row([
                recased[0].as_str(),
                recased[1].as_str(),
                recased[2].as_str(),
                recased[3].as_str(),
                recased[4].as_str(),
            ]);
            let fields = [
                values[0].as_str(),
                values[1].as_str(),
                values[2].as_str(),
                values[3].as_str(),
                values[4].as_str(),
            ];
            let query = ValidationQuery::select(literal_select(fields), vec![constraint]);
            prop_assert_eq!(evaluate(&graph(), &[query]).expect("evaluate"), "");
        }

        #[test]
        fn singular_reports_only_repeats(values in proptest::collection::vec(0u8..4, 0..12)) {
            let listed = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
            let query = format!("SELECT ?x WHERE {{ VALUES ?x {{ {listed} }} }}");
            let message = evaluate(&graph(), &[ValidationQuery::singular(query)]).expect("evaluate");

            let distinct = values.iter().collect::<HashSet<_>>().len();
            let repeats = values.len() - distinct;
            if repeats == 0 {
                prop_assert_eq!(message, "");
            } else {
                let shown = repeats.min(MAX_REPORTED_ROWS);
                let listed = message
                    .split_once("shown) [")
                    .and_then(|(_, rest)| rest.split_once(']'))
                    .map(|(list, _)| list.matches("\"(").count())
                    .unwrap_or_default();
                prop_assert_eq!(listed, shown);
            }
        }
    }
}
