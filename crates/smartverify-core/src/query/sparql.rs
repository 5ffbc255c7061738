use std::fmt::Write as _;

const HEADER: &str = "PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX dcterms: <http://purl.org/dc/terms/>
PREFIX sp: <http://smartplatforms.org/terms#>
";

/// Graph path from an instance of the model class to the node being constrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct FocusPath {
    root_class: String,
    hops: Vec<String>,
}

impl FocusPath {
    pub(super) fn new(root_class: &str) -> Self {
        Self {
            root_class: root_class.to_string(),
            hops: Vec::new(),
        }
    }

    pub(super) fn extend(&self, property: &str) -> Self {
        let mut hops = self.hops.clone();
        hops.push(property.to_string());
        Self {
            root_class: self.root_class.clone(),
            hops,
        }
    }

    pub(super) fn depth(&self) -> usize {
        self.hops.len()
    }

    fn focus(&self) -> String {
        format!("?s{}", self.hops.len())
    }

    fn pattern(&self) -> String {
        let mut out = format!("  ?s0 rdf:type <{}> .\n", self.root_class);
        for (index, hop) in self.hops.iter().enumerate() {
            let _ = writeln!(out, "  ?s{index} <{hop}> ?s{} .", index + 1);
        }
        out
    }
}

pub(super) fn presence_query(class_iri: &str) -> String {
    format!(
        "{HEADER}SELECT ?missing WHERE {{
  VALUES ?missing {{ <{class_iri}> }}
  FILTER NOT EXISTS {{ ?instance rdf:type <{class_iri}> }}
}}"
    )
}

pub(super) fn missing_property_query(path: &FocusPath, property: &str) -> String {
    let focus = path.focus();
    format!(
        "{HEADER}SELECT DISTINCT {focus} WHERE {{
{pattern}  FILTER NOT EXISTS {{ {focus} <{property}> ?value }}
}}",
        pattern = path.pattern()
    )
}

pub(super) fn too_few_values_query(path: &FocusPath, property: &str, min: u32) -> String {
    let focus = path.focus();
    format!(
        "{HEADER}SELECT {focus} (COUNT(DISTINCT ?value) AS ?count) WHERE {{
{pattern}  OPTIONAL {{ {focus} <{property}> ?value }}
}}
GROUP BY {focus}
HAVING (COUNT(DISTINCT ?value) < {min})",
        pattern = path.pattern()
    )
}

pub(super) fn too_many_values_query(path: &FocusPath, property: &str, max: u32) -> String {
    let focus = path.focus();
    format!(
        "{HEADER}SELECT {focus} (COUNT(DISTINCT ?value) AS ?count) WHERE {{
{pattern}  {focus} <{property}> ?value .
}}
GROUP BY {focus}
HAVING (COUNT(DISTINCT ?value) > {max})",
        pattern = path.pattern()
    )
}

/// One row per distinct value, projected to the focus node.
pub(super) fn single_value_query(path: &FocusPath, property: &str) -> String {
    let focus = path.focus();
    format!(
        "{HEADER}SELECT {focus} WHERE {{
  {{
    SELECT DISTINCT {focus} ?value WHERE {{
{pattern}  {focus} <{property}> ?value .
    }}
  }}
}}",
        pattern = path.pattern()
    )
}

/// Projects `(uri, code, identifier, title, system)` for every coded value.
pub(super) fn coded_value_query(path: &FocusPath, property: &str, code_class: &str) -> String {
    let focus = path.focus();
    format!(
        "{HEADER}SELECT ?uri ?code ?identifier ?title ?system WHERE {{
{pattern}  {focus} <{property}> ?uri .
  OPTIONAL {{ ?uri rdf:type ?code . FILTER(?code = <{code_class}>) }}
  OPTIONAL {{ ?uri dcterms:identifier ?identifier }}
  OPTIONAL {{ ?uri dcterms:title ?title }}
  OPTIONAL {{ ?uri sp:system ?system }}
}}",
        pattern = path.pattern()
    )
}
