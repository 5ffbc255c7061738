use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::{info, warn};

use crate::config::VerifierConfig;
use crate::error::{Result, VerifyError};

use super::model::OntologyCatalog;
use super::parse::parse_ontology;

pub const BUNDLED_ONTOLOGY: &str = include_str!("../../data/smart.owl");

static SHARED_CATALOG: OnceLock<OntologyCatalog> = OnceLock::new();
static SHARED_CATALOG_INIT: Mutex<()> = Mutex::new(());

impl OntologyCatalog {
    pub fn parse(document: &str) -> Result<Self> {
        parse_ontology(document)
    }

    pub fn bundled() -> Result<Self> {
        parse_ontology(BUNDLED_ONTOLOGY)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let document = std::fs::read_to_string(path).map_err(|err| {
            VerifyError::Ontology(format!(
                "failed to read ontology document '{}': {err}",
                path.display()
            ))
        })?;
        parse_ontology(&document)
    }

    pub fn from_config(config: &VerifierConfig) -> Result<Self> {
        match config.ontology_path.as_deref() {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }
}

/// Process-wide catalog, parsed at most once.
///
/// A failed load is not cached, so a later call retries it.
pub fn shared_catalog() -> Result<&'static OntologyCatalog> {
    if let Some(catalog) = SHARED_CATALOG.get() {
        return Ok(catalog);
    }

    let _guard = SHARED_CATALOG_INIT
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(catalog) = SHARED_CATALOG.get() {
        return Ok(catalog);
    }

    let config = VerifierConfig::from_env();
    match OntologyCatalog::from_config(&config) {
        Ok(catalog) => {
            info!(
                source = %config
                    .ontology_path
                    .as_deref()
                    .map_or_else(|| "bundled".to_string(), |path| path.display().to_string()),
                calls = catalog.calls().len(),
                "ontology catalog loaded"
            );
            Ok(SHARED_CATALOG.get_or_init(|| catalog))
        }
        Err(err) => {
            warn!(error = %err, "ontology catalog load failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_catalog_returns_the_same_instance_across_threads() {
        let handles = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    shared_catalog().expect("shared catalog") as *const OntologyCatalog as usize
                })
            })
            .collect::<Vec<_>>();
        let addresses = handles
            .into_iter()
            .map(|handle| handle.join().expect("join"))
            .collect::<Vec<_>>();
        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn from_path_reports_missing_documents_as_ontology_errors() {
        let err = OntologyCatalog::from_path(Path::new("/nonexistent/smart.owl"))
            .expect_err("must fail");
        assert!(matches!(err, VerifyError::Ontology(_)));
    }
}
