use std::fmt;

use oxigraph::io::RdfFormat;
use oxigraph::model::Term;
use oxigraph::sparql::{QueryResults, QuerySolution};
use oxigraph::store::Store;

use crate::error::{ParseError, Result, VerifyError};

/// In-memory RDF graph queryable with SPARQL SELECT.
pub struct RdfGraph {
    store: Store,
}

impl fmt::Debug for RdfGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RdfGraph").finish_non_exhaustive()
    }
}

impl RdfGraph {
    pub fn parse_rdf_xml(payload: &str) -> std::result::Result<Self, ParseError> {
        let store = Store::new().map_err(|err| ParseError::Rdf(err.to_string()))?;
        store
            .load_from_reader(RdfFormat::RdfXml, payload.as_bytes())
            .map_err(|err| ParseError::Rdf(err.to_string()))?;
        Ok(Self { store })
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store.is_empty()?)
    }

    pub fn select(&self, query: &str) -> Result<Vec<QueryRow>> {
        self.select_where(query, |_| true)
    }

    /// Runs `query` and keeps the solutions whose `variable` is bound to `value`.
    ///
    /// The binding is a typed term comparison against the query's solutions, so
    /// a node taken from one result set can drive a dependent query without its
    /// label ever being spliced into query text.
    pub fn select_bound(&self, query: &str, variable: &str, value: &Term) -> Result<Vec<QueryRow>> {
        self.select_where(query, |solution| solution.get(variable) == Some(value))
    }

    fn select_where(
        &self,
        query: &str,
        keep: impl Fn(&QuerySolution) -> bool,
    ) -> Result<Vec<QueryRow>> {
        match self.store.query(query)? {
            QueryResults::Solutions(solutions) => {
                let mut rows = Vec::new();
                for solution in solutions {
                    let solution = solution?;
                    if keep(&solution) {
                        rows.push(QueryRow {
                            values: solution.values().to_vec(),
                        });
                    }
                }
                Ok(rows)
            }
            QueryResults::Boolean(_) => Err(VerifyError::UnsupportedQuery(
                "ASK queries do not produce rows".to_string(),
            )),
            QueryResults::Graph(_) => Err(VerifyError::UnsupportedQuery(
                "CONSTRUCT/DESCRIBE queries do not produce rows".to_string(),
            )),
        }
    }
}

/// One solution of a SELECT query, in projection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRow {
    values: Vec<Option<Term>>,
}

impl QueryRow {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn term(&self, index: usize) -> Option<&Term> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Lexical text of a column; unbound columns read as the empty string.
    #[must_use]
    pub fn text(&self, index: usize) -> String {
        self.term(index).map(term_text).unwrap_or_default()
    }

    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        (0..self.values.len()).map(|index| self.text(index)).collect()
    }
}

impl fmt::Display for QueryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.texts().join(", "))
    }
}

/// IRI string, blank node label, or literal lexical form.
#[must_use]
pub fn term_text(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::BlankNode(node) => node.as_str().to_string(),
        Term::Literal(literal) => literal.value().to_string(),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}
