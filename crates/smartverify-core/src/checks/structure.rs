use crate::engine::evaluate_model;
use crate::error::Result;
use crate::graph::RdfGraph;
use crate::runner::RunContext;

use super::{CheckResult, Verdict};

const ALLERGY_MODEL: &str = "Allergy";
const ALLERGY_EXCLUSION_MODEL: &str = "AllergyExclusion";

/// The parsed graph when it holds at least one triple.
///
/// Parse failures and empty graphs are reported by the RDF validity check.
pub(super) fn populated_graph<'c>(ctx: &'c RunContext<'_>) -> Result<Option<&'c RdfGraph>> {
    let Ok(graph) = ctx.rdf() else {
        return Ok(None);
    };
    if graph.is_empty()? {
        return Ok(None);
    }
    Ok(Some(graph))
}

pub(super) fn structure(ctx: &RunContext<'_>) -> CheckResult {
    let Some(graph) = populated_graph(ctx)? else {
        return Ok(Verdict::Pass);
    };
    let message = evaluate_model(graph, ctx.catalog()?, ctx.model())?;
    Ok(Verdict::from_message(message))
}

/// Allergy payloads are judged against both the allergy and the allergy
/// exclusion shapes; any message from either one fails the check.
pub(super) fn allergy_structure(ctx: &RunContext<'_>) -> CheckResult {
    let Some(graph) = populated_graph(ctx)? else {
        return Ok(Verdict::Pass);
    };
    let catalog = ctx.catalog()?;
    let allergy = evaluate_model(graph, catalog, ALLERGY_MODEL)?;
    let exclusion = evaluate_model(graph, catalog, ALLERGY_EXCLUSION_MODEL)?;
    Ok(Verdict::from_message(allergy + &exclusion))
}
