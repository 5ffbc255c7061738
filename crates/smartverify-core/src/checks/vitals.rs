use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::runner::RunContext;

use super::structure::populated_graph;
use super::{CheckResult, Verdict};

pub const METERS_UNIT: &str = "m";
pub const MM_HG_UNIT: &str = "mm[Hg]";

const HEIGHT_QUERY: &str = "PREFIX dcterms: <http://purl.org/dc/terms/>
PREFIX sp: <http://smartplatforms.org/terms#>
SELECT ?vital_date ?height ?units
WHERE {
   ?v dcterms:date ?vital_date .
   ?v sp:height ?h .
   ?h sp:value ?height .
   ?h sp:unit ?units .
}";

const BLOOD_PRESSURE_QUERY: &str = "PREFIX dcterms: <http://purl.org/dc/terms/>
PREFIX sp: <http://smartplatforms.org/terms#>
SELECT ?vital_date ?bloodPressure
WHERE {
   ?v dcterms:date ?vital_date .
   ?v sp:bloodPressure ?bloodPressure .
}";

/// Readings of one blood-pressure node; callers bind `?bp`.
const BLOOD_PRESSURE_READINGS_QUERY: &str = "PREFIX sp: <http://smartplatforms.org/terms#>
SELECT ?bp ?systolic ?diastolic ?units1 ?units2
WHERE {
   ?bp sp:systolic ?s .
   ?s sp:value ?systolic .
   ?s sp:unit ?units1 .
   ?bp sp:diastolic ?d .
   ?d sp:value ?diastolic .
   ?d sp:unit ?units2 .
}";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d"];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

pub(super) fn height(ctx: &RunContext<'_>) -> CheckResult {
    let Some(graph) = populated_graph(ctx)? else {
        return Ok(Verdict::Pass);
    };
    for row in graph.select(HEIGHT_QUERY)? {
        let (date, height, units) = (row.text(0), row.text(1), row.text(2));
        if !is_iso8601(&date) {
            return Ok(Verdict::fail(format!("Encountered non-ISO8601 date: {date}")));
        }
        if !is_number(&height) {
            return Ok(Verdict::fail(format!("Could not parse height value: {height}")));
        }
        if units != METERS_UNIT {
            return Ok(Verdict::fail(format!("Encountered bad units: {units}")));
        }
    }
    Ok(Verdict::Pass)
}

pub(super) fn blood_pressure(ctx: &RunContext<'_>) -> CheckResult {
    let Some(graph) = populated_graph(ctx)? else {
        return Ok(Verdict::Pass);
    };
    for row in graph.select(BLOOD_PRESSURE_QUERY)? {
        let date = row.text(0);
        if !is_iso8601(&date) {
            return Ok(Verdict::fail(format!("Encountered non-ISO8601 date: {date}")));
        }
        let Some(node) = row.term(1) else {
            continue;
        };
        for reading in graph.select_bound(BLOOD_PRESSURE_READINGS_QUERY, "bp", node)? {
            let (systolic, diastolic) = (reading.text(1), reading.text(2));
            if !is_number(&systolic) {
                return Ok(Verdict::fail(format!(
                    "Could not parse systolic pressure value: {systolic}"
                )));
            }
            if !is_number(&diastolic) {
                return Ok(Verdict::fail(format!(
                    "Could not parse diastolic pressure value: {diastolic}"
                )));
            }
            for units in [reading.text(3), reading.text(4)] {
                if units != MM_HG_UNIT {
                    return Ok(Verdict::fail(format!("Encountered bad units: {units}")));
                }
            }
        }
    }
    Ok(Verdict::Pass)
}

fn is_iso8601(value: &str) -> bool {
    let value = value.trim();
    parses_extended(value) || to_extended(value).is_some_and(|expanded| parses_extended(&expanded))
}

fn parses_extended(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || OFFSET_FORMATS
            .iter()
            .any(|format| DateTime::parse_from_str(value, format).is_ok())
        || DATE_TIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
}

/// Rewrites reduced-precision (`2010`, `2010-05`) and basic-format
/// (`20100512`, `20100512T0400`) values into the extended form.
fn to_extended(value: &str) -> Option<String> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    let (date, time) = match value.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (value, None),
    };

    let date = match date.len() {
        4 if all_digits(date) && time.is_none() => format!("{date}-01-01"),
        7 if time.is_none() && date.as_bytes().get(4) == Some(&b'-') => {
            let (year, month) = (date.get(..4)?, date.get(5..)?);
            if !all_digits(year) || !all_digits(month) {
                return None;
            }
            format!("{year}-{month}-01")
        }
        8 if all_digits(date) => format!("{}-{}-{}", date.get(..4)?, date.get(4..6)?, date.get(6..)?),
        _ => return None,
    };

    match time {
        None => Some(date),
        Some(time) if all_digits(time) && time.len() == 4 => {
            Some(format!("{date}T{}:{}", time.get(..2)?, time.get(2..)?))
        }
        Some(time) if all_digits(time) && time.len() == 6 => Some(format!(
            "{date}T{}:{}:{}",
            time.get(..2)?,
            time.get(2..4)?,
            time.get(4..)?
        )),
        Some(_) => None,
    }
}

fn is_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}
