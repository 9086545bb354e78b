//! Short-track deviations.
//!
//! Only the run log reports these, one per line:
//!
//! ```text
//! Deviation: Short test track #5 (reference track #9 [A:01234] [S:0xABCDEF]) starting near 11:22:33.444 UTC (diff=1.250 seconds)
//! ```
//!
//! The first track is the short one; `diff` is how much shorter it is.

use super::helpers::blank_view_point;
use super::patterns;
use crate::model::{Side, Timing, ViewPointType};
use crate::time_of_day;
use crate::{Options, Result, ViewPoint};

pub(crate) fn build(line: &str, id: u64, options: &Options) -> Result<ViewPoint> {
    let number = (id + 1).to_string();
    let mut vp = blank_view_point(id, ViewPointType::ShortTrack, format!("DEV #{number}"), number);
    vp.timing = Some(Timing::default());

    let Some(caps) = patterns::short_track().captures(line) else { return Ok(vp) };

    let short = side_of(&caps[1]);
    let (first, second) = (options.tracker_name(short), options.tracker_name(short.opposite()));
    let (first_track, second_track) = (&caps[2], &caps[4]);
    let (mode_3a, address, stamp, diff) = (&caps[5], &caps[6], &caps[7], &caps[8]);

    let mut location = Vec::with_capacity(3);
    if !mode_3a.is_empty() && mode_3a.bytes().all(|b| b.is_ascii_digit()) {
        location.push(format!("mA:{mode_3a}"));
    }
    if address.starts_with("0x") {
        location.push(format!("mS:{address}"));
    }
    location.push(format!("{stamp} UTC"));

    vp.text = Some(format!(
        "{first} {first_track} to {second} {second_track}\ndiff={diff} seconds\n{}",
        location.join(" ")
    ));
    vp.timing = Some(Timing { time: Some(time_of_day::parse(stamp)?.seconds()), time_window: diff.parse().ok() });
    vp.filters.set_track_number(first, first_track);
    vp.filters.set_track_number(second, second_track);

    Ok(vp)
}

fn side_of(word: &str) -> Side {
    match word {
        "tst" | "test" => Side::Test,
        _ => Side::Reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "Deviation: Short test track #5 (reference track #9 [A:1234] [S:0xABCDEF]) \
                        starting near 11:22:33.444 UTC (diff=1.250 seconds)";

    #[test]
    fn short_test_track() {
        let vp = build(LINE, 2, &Options::default()).unwrap();
        assert_eq!(vp.id, 2);
        assert_eq!(vp.name, "DEV #3");
        assert_eq!(vp.deviations, vec!["3"]);
        let timing = vp.timing.clone().unwrap();
        assert_eq!(timing.time, Some(time_of_day::to_seconds(11, 22, 33, 444)));
        assert_eq!(timing.time_window, Some(1.25));
        assert_eq!(vp.text.as_deref(), Some("TST 5 to REF 9\ndiff=1.250 seconds\nmA:1234 mS:0xABCDEF 11:22:33.444 UTC"));
        assert_eq!(vp.filters.track_number("TST"), Some("5"));
        assert_eq!(vp.filters.track_number("REF"), Some("9"));
        assert!(vp.filters.time_of_day.is_none());
    }

    #[test]
    fn short_reference_track_without_codes() {
        let line = "Deviation: Short reference track #12 (test track #3 [A:-] [S:-]) \
                    starting near 08:00:00.000 UTC (diff=0.5 seconds)";
        let options = Options { reference_name: "ARTAS".into(), test_name: "NEW".into(), ..Options::default() };
        let vp = build(line, 0, &options).unwrap();
        assert_eq!(vp.text.as_deref(), Some("ARTAS 12 to NEW 3\ndiff=0.5 seconds\n08:00:00.000 UTC"));
        assert_eq!(vp.filters.track_number("ARTAS"), Some("12"));
        assert_eq!(vp.filters.track_number("NEW"), Some("3"));
    }

    #[test]
    fn mode_3a_token_is_kept_verbatim_when_numeric() {
        let location = |a: &str| {
            let line = format!(
                "Deviation: Short test track #1 (reference track #2 [A:{a}] [S:-]) starting near 00:00:01.000 UTC (diff=1.0 seconds)"
            );
            let text = build(&line, 0, &Options::default()).unwrap().text.unwrap();
            text.rsplit('\n').next().unwrap_or_default().to_string()
        };
        assert_eq!(location("01234"), "mA:01234 00:00:01.000 UTC");
        assert_eq!(location("1234"), "mA:1234 00:00:01.000 UTC");
        assert_eq!(location("-"), "00:00:01.000 UTC");
        assert_eq!(location("12x4"), "00:00:01.000 UTC");
    }

    #[test]
    fn unmatched_line_degrades() {
        let vp = build("Deviation: Short track summary follows", 4, &Options::default()).unwrap();
        assert_eq!(vp.id, 4);
        assert_eq!(vp.text, None);
        assert_eq!(vp.timing, Some(Timing::default()));
        assert!(vp.filters.track_numbers.is_empty());
    }
}
