use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Result, VerifyError};
use crate::graph::{QueryRow, RdfGraph};

use super::compile::{RawRestriction, compile_shapes};
use super::model::{ConstraintRow, OntologyCallDescriptor, OntologyCatalog};

const PREFIXES: &str = "PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX dcterms: <http://purl.org/dc/terms/>
PREFIX sp: <http://smartplatforms.org/terms#>
PREFIX api: <http://smartplatforms.org/terms/api#>
";

const CALLS_QUERY: &str = "SELECT ?path ?method ?target ?category WHERE {
  ?call rdf:type api:Call ;
        api:path ?path ;
        api:method ?method ;
        api:target ?target .
  OPTIONAL { ?call api:category ?category }
}";

const RESTRICTIONS_QUERY: &str = "SELECT ?class ?property ?cardinality ?min ?max ?range WHERE {
  ?class rdfs:subClassOf ?restriction .
  ?restriction rdf:type owl:Restriction ;
               owl:onProperty ?property .
  OPTIONAL { ?restriction owl:cardinality ?cardinality }
  OPTIONAL { ?restriction owl:minCardinality ?min }
  OPTIONAL { ?restriction owl:maxCardinality ?max }
  OPTIONAL { ?restriction owl:allValuesFrom ?all }
  OPTIONAL { ?restriction owl:someValuesFrom ?some }
  BIND(COALESCE(?all, ?some) AS ?range)
  FILTER(isIRI(?class))
}";

const SUPERCLASSES_QUERY: &str = "SELECT ?class ?super WHERE {
  ?class rdfs:subClassOf ?super .
  FILTER(isIRI(?class) && isIRI(?super))
}";

const CODE_CLASSES_QUERY: &str = "SELECT DISTINCT ?class WHERE {
  ?class rdfs:subClassOf+ sp:Code .
  FILTER(isIRI(?class))
}";

const CODE_INSTANCES_QUERY: &str = "SELECT ?class ?uri ?identifier ?title ?system WHERE {
  ?class rdfs:subClassOf+ sp:Code .
  ?uri rdf:type ?class .
  OPTIONAL { ?uri dcterms:identifier ?identifier }
  OPTIONAL { ?uri dcterms:title ?title }
  OPTIONAL { ?uri sp:system ?system }
  FILTER(isIRI(?uri))
}";

pub fn parse_ontology(document: &str) -> Result<OntologyCatalog> {
    let graph = RdfGraph::parse_rdf_xml(document)
        .map_err(|err| VerifyError::Ontology(format!("ontology document parse failed: {err}")))?;

    let calls = extract_calls(&graph)?;
    let restrictions = extract_restrictions(&graph)?;
    let superclasses = select(&graph, SUPERCLASSES_QUERY)?
        .iter()
        .map(|row| (row.text(0), row.text(1)))
        .collect::<Vec<_>>();
    let shapes = compile_shapes(&restrictions, &superclasses)?;
    let code_tables = extract_code_tables(&graph)?;

    debug!(
        calls = calls.len(),
        shapes = shapes.len(),
        code_classes = code_tables.len(),
        "ontology parsed"
    );

    Ok(OntologyCatalog {
        calls,
        shapes,
        code_tables,
    })
}

fn select(graph: &RdfGraph, body: &str) -> Result<Vec<QueryRow>> {
    graph
        .select(&format!("{PREFIXES}{body}"))
        .map_err(|err| VerifyError::Ontology(format!("ontology extraction query failed: {err}")))
}

fn extract_calls(graph: &RdfGraph) -> Result<Vec<OntologyCallDescriptor>> {
    let mut calls = select(graph, CALLS_QUERY)?
        .iter()
        .map(|row| OntologyCallDescriptor {
            path: row.text(0),
            method: row.text(1),
            target: row.text(2),
            category: row.text(3),
        })
        .collect::<Vec<_>>();
    calls.sort();
    calls.dedup();
    Ok(calls)
}

fn extract_restrictions(graph: &RdfGraph) -> Result<Vec<RawRestriction>> {
    let mut out = Vec::new();
    for row in select(graph, RESTRICTIONS_QUERY)? {
        let class_iri = row.text(0);
        let property = row.text(1);
        let cardinality = parse_cardinality(&row, 2, &class_iri, &property)?;
        let min = parse_cardinality(&row, 3, &class_iri, &property)?;
        let max = parse_cardinality(&row, 4, &class_iri, &property)?;
        let range = row.term(5).map(|_| row.text(5));
        out.push(RawRestriction {
            class_iri,
            property,
            min_cardinality: cardinality.or(min),
            max_cardinality: cardinality.or(max),
            range,
        });
    }
    out.sort_by(|a, b| {
        (a.class_iri.as_str(), a.property.as_str()).cmp(&(b.class_iri.as_str(), b.property.as_str()))
    });
    Ok(out)
}

fn parse_cardinality(
    row: &QueryRow,
    index: usize,
    class_iri: &str,
    property: &str,
) -> Result<Option<u32>> {
    if row.term(index).is_none() {
        return Ok(None);
    }
    let raw = row.text(index);
    raw.trim().parse::<u32>().map(Some).map_err(|_| {
        VerifyError::Ontology(format!(
            "invalid cardinality '{raw}' on class '{class_iri}' property '{property}'"
        ))
    })
}

fn extract_code_tables(graph: &RdfGraph) -> Result<BTreeMap<String, Vec<ConstraintRow>>> {
    let mut tables = BTreeMap::<String, Vec<ConstraintRow>>::new();
    for row in select(graph, CODE_CLASSES_QUERY)? {
        tables.entry(row.text(0)).or_default();
    }
    for row in select(graph, CODE_INSTANCES_QUERY)? {
        let code = row.text(0);
        tables.entry(code.clone()).or_default().push(ConstraintRow {
            uri: row.text(1),
            code,
            identifier: row.text(2),
            title: row.text(3),
            system: row.text(4),
        });
    }
    for rows in tables.values_mut() {
        rows.sort_by(|a, b| a.uri.cmp(&b.uri));
        rows.dedup();
    }
    Ok(tables)
}
