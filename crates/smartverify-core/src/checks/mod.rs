//! Individual checks of a validation run.
//!
//! A check reads the run's inputs from a [`RunContext`] and returns a
//! [`Verdict`]. A check stops at its first failure, so it contributes at most
//! one message. An `Err` is an engine fault and is recorded as an error
//! rather than a failure.

use crate::error::Result;
use crate::runner::RunContext;

mod content;
mod payload;
mod structure;
mod vitals;

pub use payload::{JSON_MIME, RDF_MIME, is_empty_json, parse_json, parse_rdf};
pub use vitals::{METERS_UNIT, MM_HG_UNIT};

pub const UNKNOWN_MODEL_MESSAGE: &str = "Data model does not have an associated test suite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
}

impl Verdict {
    pub fn fail(detail: impl Into<String>) -> Self {
        Self::Fail(detail.into())
    }

    /// Empty engine output passes; anything else is the failure detail.
    #[must_use]
    pub fn from_message(message: String) -> Self {
        if message.is_empty() {
            Self::Pass
        } else {
            Self::Fail(message)
        }
    }
}

pub type CheckResult = Result<Verdict>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    ValidRdf,
    RdfContentType,
    Structure,
    AllergyStructure,
    Height,
    BloodPressure,
    ValidJson,
    JsonContentType,
    Consistency,
    Unknown,
}

impl Check {
    /// Stable name used as the `[name]` prefix of reported messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ValidRdf => "testValidRDF",
            Self::RdfContentType | Self::JsonContentType => "testContentType",
            Self::Structure => "testStructure",
            Self::AllergyStructure => "testStructure2",
            Self::Height => "testHeight",
            Self::BloodPressure => "testBloodPressure",
            Self::ValidJson => "testValidJSON",
            Self::Consistency => "testConsistency",
            Self::Unknown => "testUnknown",
        }
    }

    pub fn run(self, ctx: &RunContext<'_>) -> CheckResult {
        match self {
            Self::ValidRdf => content::valid_rdf(ctx),
            Self::RdfContentType => content::content_type(ctx, RDF_MIME),
            Self::Structure => structure::structure(ctx),
            Self::AllergyStructure => structure::allergy_structure(ctx),
            Self::Height => vitals::height(ctx),
            Self::BloodPressure => vitals::blood_pressure(ctx),
            Self::ValidJson => content::valid_json(ctx),
            Self::JsonContentType => content::content_type(ctx, JSON_MIME),
            Self::Consistency => content::consistency(ctx),
            Self::Unknown => Ok(Verdict::fail(UNKNOWN_MODEL_MESSAGE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_check_always_fails() {
        let ctx = RunContext::new("UnknownX", "", "");
        assert_eq!(
            Check::Unknown.run(&ctx).expect("check"),
            Verdict::fail(UNKNOWN_MODEL_MESSAGE)
        );
    }

    #[test]
    fn content_type_checks_share_one_name() {
        assert_eq!(Check::RdfContentType.name(), Check::JsonContentType.name());
    }

    #[test]
    fn from_message_treats_empty_text_as_a_pass() {
        assert_eq!(Verdict::from_message(String::new()), Verdict::Pass);
        assert_eq!(
            Verdict::from_message("boom".to_string()),
            Verdict::fail("boom")
        );
    }
}
