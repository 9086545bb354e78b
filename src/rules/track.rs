//! Extra and missing track builders.
//!
//! An extra track exists only in the test run, a missing track only in the
//! reference run. AOC also reports how many plausible counterparts it found on
//! the other side; one or more candidates make the deviation "dubious".

use super::helpers::{blank_view_point, candidate_track_numbers};
use super::{DeviationKind, patterns};
use crate::model::{Dubiousness, ModeACodesFilter, Side, TargetAddressFilter, TimeOfDayFilter, ViewPointType};
use crate::{DeviationHeader, Options, ViewPoint};

pub(crate) fn build(kind: DeviationKind, header: &DeviationHeader, text: &str, options: &Options) -> ViewPoint {
    let (owner, pattern) = match kind {
        DeviationKind::MissingTrack => (Side::Reference, patterns::missing_track()),
        _ => (Side::Test, patterns::extra_track()),
    };
    let view_point_type = |d| match owner {
        Side::Test => ViewPointType::ExtraTrack(d),
        Side::Reference => ViewPointType::MissingTrack(d),
    };

    let mut vp = blank_view_point(
        header.id,
        view_point_type(Dubiousness::Clear),
        format!("DEV #{}", header.number),
        header.number.clone(),
    );
    vp.filters.time_of_day = Some(TimeOfDayFilter::default());

    let Some(caps) = pattern.captures(text) else { return vp };
    let (track, sub_track) = (&caps[1], &caps[2]);
    vp.filters.time_of_day = Some(TimeOfDayFilter { minimum: Some(caps[3].to_string()), maximum: Some(caps[4].to_string()) });
    vp.filters.set_track_number(options.tracker_name(owner), track);

    let candidates = patterns::track_candidates().captures(text).map(|c| c[1].to_string());
    let mode_3a = patterns::mode_3a_value().captures(text).map(|c| c[1].to_string());
    let address = patterns::aircraft_address_value().captures(text).map(|c| c[1].to_string());
    let mode_c = patterns::mode_c_value().captures(text).map(|c| c[1].to_string());

    let mut context = Vec::new();
    let mut dubious = Dubiousness::Clear;
    if let Some(count) = candidates.as_deref() {
        if count != "no" {
            vp.filters.set_track_number(options.tracker_name(owner.opposite()), candidate_track_numbers(text));
            dubious = if count == "1" { Dubiousness::Single } else { Dubiousness::Multiple };
        }
        context.push(format!("{count} candidates"));
    }
    if let Some(code) = &mode_3a {
        context.push(format!("mode 3/A:{code}"));
    }
    if let Some(address) = &address {
        context.push(format!("aircraft address:0x{address}"));
    }
    if let Some(mode_c) = &mode_c {
        context.push(format!("mode C:{mode_c}"));
    }

    if dubious == Dubiousness::Multiple {
        vp.filters.mode_3a_codes = mode_3a.map(|values| ModeACodesFilter { values });
        vp.filters.target_address = address.map(|values| TargetAddressFilter { values });
    }
    vp.kind = view_point_type(dubious);

    vp.text = Some(format!("{} {track}:({track}.{sub_track})\n{}", options.tracker_name(owner), context.join("; ")));
    vp
}
