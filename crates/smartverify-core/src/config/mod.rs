use std::path::PathBuf;

mod env;

pub const ONTOLOGY_PATH_ENV: &str = "SMARTVERIFY_ONTOLOGY";
pub const LOG_FILTER_ENV: &str = "SMARTVERIFY_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Replacement ontology document; `None` selects the bundled one.
    pub ontology_path: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl VerifierConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            ontology_path: env::read_path_env(ONTOLOGY_PATH_ENV),
            log_filter: env::read_non_empty_env(LOG_FILTER_ENV),
        }
    }

    #[must_use]
    pub fn with_ontology_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.ontology_path = path;
        }
        self
    }

    #[must_use]
    pub fn log_filter_or_default(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
