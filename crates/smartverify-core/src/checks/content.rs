use crate::runner::RunContext;

use super::payload::{JSON_MIME, RDF_MIME, is_empty_json};
use super::{CheckResult, Verdict};

pub(super) fn valid_rdf(ctx: &RunContext<'_>) -> CheckResult {
    let Ok(graph) = ctx.rdf() else {
        return Ok(Verdict::fail("RDF-XML parsing failed"));
    };
    if graph.is_empty()? {
        return Ok(Verdict::fail("EMPTY RESULT SET"));
    }
    Ok(Verdict::Pass)
}

pub(super) fn valid_json(ctx: &RunContext<'_>) -> CheckResult {
    match ctx.json() {
        Ok(value) if !is_empty_json(value) => Ok(Verdict::Pass),
        _ => Ok(Verdict::fail("JSON parsing failed")),
    }
}

pub(super) fn content_type(ctx: &RunContext<'_>, expected: &str) -> CheckResult {
    let actual = ctx.content_type();
    if actual == expected {
        return Ok(Verdict::Pass);
    }
    Ok(Verdict::fail(format!(
        "HTTP content-type '{actual}' should be '{expected}'"
    )))
}

/// The payload must parse as whatever its declared content type names.
pub(super) fn consistency(ctx: &RunContext<'_>) -> CheckResult {
    let declared = ctx.content_type();
    if declared == JSON_MIME && ctx.json().is_err() {
        return Ok(Verdict::fail(format!(
            "HTTP content-type is '{JSON_MIME}' but JSON parsing failed"
        )));
    }
    if declared == RDF_MIME && ctx.rdf().is_err() {
        return Ok(Verdict::fail(format!(
            "HTTP content-type is '{RDF_MIME}' but RDF-XML parsing failed"
        )));
    }
    Ok(Verdict::Pass)
}
