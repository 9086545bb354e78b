//! Track-content deviations.
//!
//! A matched pair of tracks disagrees on one value. The preamble names both
//! tracks and the time; the clause after it is either
//! `reported K=V1; expected V2` (the test value differs) or `unexpected ...`
//! (the test track carries something the reference does not).

use regex::Captures;

use super::helpers::{blank_view_point, context_variables, time_span_filter};
use super::{Classification, ContentKind, patterns, registry};
use crate::engine::Diagnostic;
use crate::model::{Side, Timing, ViewPointType};
use crate::time_of_day;
use crate::{DeviationHeader, Options, Result, ViewPoint};

pub(crate) fn classify(header: &DeviationHeader, text: &str, options: &Options) -> Result<Classification> {
    let Some(preamble) = patterns::track_contents().captures(text) else {
        tracing::debug!(number = %header.number, "track contents without preamble");
        return Ok(Classification::Ignored);
    };

    match &preamble[6] {
        "reported" => {
            let Some(clause) = patterns::reported_clause().captures(text) else {
                return Ok(unknown_reported(header, None));
            };
            let field = &clause[1];
            let Some(kind) = registry::reported_kind(field) else {
                return Ok(unknown_reported(header, Some(field)));
            };
            let payload = format!("reported {}={}; expected {}", field, &clause[2], &clause[3]);
            build(kind, header, &preamble, payload, text, options).map(Classification::ViewPoint)
        },
        "unexpected" => {
            let Some(clause) = patterns::unexpected_clause().captures(text) else {
                return Ok(unknown_unexpected(header, None));
            };
            let value = &clause[1];
            let Some(kind) = registry::unexpected_kind(value) else {
                return Ok(unknown_unexpected(header, Some(value)));
            };
            build(kind, header, &preamble, format!("unexpected {value}"), text, options).map(Classification::ViewPoint)
        },
        other => {
            tracing::debug!(number = %header.number, clause = other, "track contents clause not handled");
            Ok(Classification::Ignored)
        },
    }
}

fn unknown_reported(header: &DeviationHeader, field: Option<&str>) -> Classification {
    Classification::Unrecognized(Diagnostic::UnknownReportedField {
        number: header.number.clone(),
        field: field.map(str::to_string),
    })
}

fn unknown_unexpected(header: &DeviationHeader, value: Option<&str>) -> Classification {
    Classification::Unrecognized(Diagnostic::UnknownUnexpectedValue {
        number: header.number.clone(),
        value: value.map(str::to_string),
    })
}

fn build(
    kind: ContentKind,
    header: &DeviationHeader,
    preamble: &Captures<'_>,
    payload: String,
    text: &str,
    options: &Options,
) -> Result<ViewPoint> {
    let (test_track, test_sub) = (&preamble[1], &preamble[2]);
    let (ref_track, ref_sub) = (&preamble[3], &preamble[4]);
    let reference = options.tracker_name(Side::Reference);
    let test = options.tracker_name(Side::Test);

    let mut vp = blank_view_point(
        header.id,
        ViewPointType::Content(kind),
        format!("{} DEV #{}", kind.abbreviation(), header.number),
        header.number.clone(),
    );
    vp.text = Some(format!(
        "{test} {test_track}:({test_track}.{test_sub}) to {reference} {ref_track}:({ref_track}.{ref_sub})\n{payload}"
    ));

    let mut timing = Timing { time: Some(time_of_day::parse(&preamble[5])?.seconds()), time_window: None };
    vp.filters.time_of_day = Some(time_span_filter(text, &mut timing)?);
    vp.timing = Some(timing);
    vp.filters.set_track_number(reference, ref_track);
    vp.filters.set_track_number(test, test_track);
    vp.context_variables = context_variables(kind);

    Ok(vp)
}
