use serde::{Deserialize, Serialize};

/// Prefix of a raw failure message; the reported detail is the text after it.
pub const ASSERTION_MARKER: &str = "AssertionError: ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub check: String,
    pub message: String,
}

/// Result of one validation run, in pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub model: String,
    pub failures: Vec<CheckRecord>,
    pub errors: Vec<CheckRecord>,
}

impl Outcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty() && self.errors.is_empty()
    }
}

/// `[check] detail` lines: failures first, then errors.
#[must_use]
pub fn format(outcome: &Outcome) -> Vec<String> {
    let failures = outcome
        .failures
        .iter()
        .map(|record| format!("[{}] {}", record.check, short_message(&record.message)));
    let errors = outcome
        .errors
        .iter()
        .map(|record| format!("[{}] {}", record.check, record.message));
    failures.chain(errors).collect()
}

fn short_message(raw: &str) -> &str {
    raw.split_once(ASSERTION_MARKER)
        .map_or(raw, |(_, detail)| detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(check: &str, message: &str) -> CheckRecord {
        CheckRecord {
            check: check.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn failures_are_stripped_and_listed_before_errors() {
        let outcome = Outcome {
            model: "Problem".to_string(),
            failures: vec![
                record("testContentType", "AssertionError: HTTP content-type 'x' should be 'y'"),
                record("testStructure", "AssertionError: RDF structure check failed\n"),
            ],
            errors: vec![record("testValidRDF", "AssertionError: kept verbatim")],
        };
        assert_eq!(
            format(&outcome),
            vec![
                "[testContentType] HTTP content-type 'x' should be 'y'".to_string(),
                "[testStructure] RDF structure check failed\n".to_string(),
                "[testValidRDF] AssertionError: kept verbatim".to_string(),
            ]
        );
        assert!(!outcome.passed());
    }

    #[test]
    fn only_the_first_marker_is_stripped() {
        assert_eq!(
            short_message("AssertionError: left AssertionError: right"),
            "left AssertionError: right"
        );
        assert_eq!(short_message("no marker"), "no marker");
    }
}
