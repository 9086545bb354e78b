use std::collections::{BTreeMap, BTreeSet};

use super::patterns;
use crate::model::{Filters, TimeOfDayFilter, Timing, ViewPoint, ViewPointType};
use crate::rules::ContentKind;
use crate::time_of_day;
use crate::Result;

pub(crate) const TRACKER: &str = "Tracker";

/// A view point with nothing but identity filled in.
pub fn blank_view_point(id: u64, kind: ViewPointType, name: String, deviation: String) -> ViewPoint {
    ViewPoint {
        id,
        kind,
        name,
        text: None,
        timing: None,
        db_objects: vec![TRACKER.to_string()],
        filters: Filters::default(),
        deviations: vec![deviation],
        context_variables: None,
    }
}

/// Earliest and latest `[HH:MM:SS.mmm]` in `text`.
///
/// Fixed-width stamps sort chronologically as strings.
pub fn bracketed_time_span(text: &str) -> Option<(String, String)> {
    let mut times: Vec<&str> =
        patterns::bracketed_time().captures_iter(text).filter_map(|c| c.get(1)).map(|m| m.as_str()).collect();
    times.sort_unstable();
    Some((times.first()?.to_string(), times.last()?.to_string()))
}

/// Time-of-day filter and window length from the bracketed stamps in `text`.
pub fn time_span_filter(text: &str, timing: &mut Timing) -> Result<TimeOfDayFilter> {
    let Some((first, last)) = bracketed_time_span(text) else { return Ok(TimeOfDayFilter::default()) };
    timing.time_window = Some(time_of_day::delta(&first, &last)?);
    Ok(TimeOfDayFilter { minimum: Some(first), maximum: Some(last) })
}

/// Every `#N.` after the first one, unique and sorted, comma separated.
pub fn candidate_track_numbers(text: &str) -> String {
    let numbers: BTreeSet<&str> = patterns::track_number_ref()
        .captures_iter(text)
        .skip(1)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    numbers.into_iter().collect::<Vec<_>>().join(",")
}

pub fn context_variables(kind: ContentKind) -> Option<BTreeMap<String, Vec<String>>> {
    let (object, variables) = kind.context_variables()?;
    Some(BTreeMap::from([(object.to_string(), variables.iter().map(|v| v.to_string()).collect())]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_span_sorts_stamps() {
        let text = "REF [10:00:03.000] x\n TST [09:59:58.500] [10:00:01.000]\n[A:1234]";
        assert_eq!(bracketed_time_span(text), Some(("09:59:58.500".to_string(), "10:00:03.000".to_string())));
        assert_eq!(bracketed_time_span("no stamps"), None);
    }

    #[test]
    fn time_span_filter_sets_window() {
        let mut timing = Timing::default();
        let filter = time_span_filter("[10:00:00.000] [10:00:02.250]", &mut timing).unwrap();
        assert_eq!(filter.minimum.as_deref(), Some("10:00:00.000"));
        assert_eq!(filter.maximum.as_deref(), Some("10:00:02.250"));
        assert_eq!(timing.time_window, Some(2.25));
    }

    #[test]
    fn candidates_skip_the_owning_track() {
        let text = "Extra test track #7.2 ... #31.1 #4.1 #31.2 #104.3";
        assert_eq!(candidate_track_numbers(text), "104,31,4");
    }
}
