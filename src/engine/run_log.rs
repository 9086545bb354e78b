//! Run-log scanning.
//!
//! The run log is read line by line. Section headers move the [`Phase`]; the
//! dataset attribute handlers (sensor identity, time of updates, duration)
//! consult it to decide which dataset a value belongs to and ignore the line
//! outside the two loading phases. Short-track notices are phase independent.

use super::{Assembler, IdSequence, LineTriggers, Phase};
use crate::model::SensorIdentity;
use crate::rules::{patterns, short_track};
use crate::time_of_day;
use crate::Result;

#[derive(Debug)]
pub(crate) struct RunLogScanner {
    phase: Phase,
    short_track_ids: IdSequence,
}

impl RunLogScanner {
    /// `first_id` is the first id not used by the helper file.
    pub fn new(first_id: u64) -> Self {
        RunLogScanner { phase: Phase::Init, short_track_ids: IdSequence::starting_at(first_id) }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scan_line(&mut self, line: &str, assembler: &mut Assembler) -> Result<()> {
        let triggers = LineTriggers::scan(line);
        if triggers.is_empty() {
            return Ok(());
        }

        if triggers.contains(LineTriggers::PHASE_HEADER) {
            if let Some(phase) = Phase::from_header(line) {
                tracing::debug!(from = ?self.phase, to = ?phase, "run log phase");
                self.phase = phase;
            }
        }
        if triggers.contains(LineTriggers::SERVER_IDENTIFICATION) {
            self.server_identification(line, assembler);
        }
        if triggers.contains(LineTriggers::TIME_OF_UPDATES) {
            self.time_of_updates(line, assembler)?;
        }
        if triggers.contains(LineTriggers::DURATION) {
            self.duration(line, assembler)?;
        }
        if triggers.contains(LineTriggers::SHORT_TRACK) {
            let id = self.short_track_ids.next_id();
            let view_point = short_track::build(line, id, assembler.options())?;
            assembler.push_view_point(view_point);
        }

        Ok(())
    }

    fn server_identification(&self, line: &str, assembler: &mut Assembler) {
        let Some(side) = self.phase.side() else { return };
        let Some(caps) = patterns::sensor_identity().captures(line) else { return };

        // Both groups are exactly two hex digits.
        let byte = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
        if let (Some(sac), Some(sic)) = (byte(1), byte(2)) {
            assembler.set_sensor_identity(side, SensorIdentity { sac, sic });
        }
    }

    fn time_of_updates(&self, line: &str, assembler: &mut Assembler) -> Result<()> {
        let Some(side) = self.phase.side() else { return Ok(()) };
        let Some(caps) = patterns::update_window().captures(line) else { return Ok(()) };

        let start = time_of_day::parse(&caps[1])?.seconds();
        let end = time_of_day::parse(&caps[2])?.seconds();
        assembler.set_time_window(side, start, end);
        Ok(())
    }

    fn duration(&self, line: &str, assembler: &mut Assembler) -> Result<()> {
        let Some(side) = self.phase.side() else { return Ok(()) };
        let Some(caps) = patterns::duration().captures(line) else { return Ok(()) };

        let duration = time_of_day::parse(&caps[1])?.seconds();
        assembler.context_mut().dataset_mut(side).duration = Some(duration);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Side, ViewPointType};
    use crate::{Error, Options};

    fn scan(lines: &str) -> Assembler {
        let mut asm = Assembler::new(&Options::default());
        let mut scanner = RunLogScanner::new(0);
        for line in lines.lines() {
            scanner.scan_line(line, &mut asm).unwrap();
        }
        asm
    }

    const RUN_LOG: &str = "\
AOC run started
Loading reference run
    Server Identification: 0x0a14
    Time of Updates: 10:00:00.000 UTC ... 11:00:00.000 UTC
    Duration: 01:00:00.000
Loading test run
    Server Identification: 0x0a15
    Time of Updates: 10:30:00.000 UTC ... 11:30:00.500 UTC
    Duration: 01:00:00.500 (approx)
Pass 1: Establish common time-frame
    Server Identification: 0xffff
    Duration: 00:00:01.000
";

    #[test]
    fn metadata_is_attributed_by_phase() {
        let asm = scan(RUN_LOG);
        let ctx = &asm.document().view_point_context;

        let reference = ctx.dataset(Side::Reference);
        assert_eq!((reference.ds_sac, reference.ds_sic), (Some(10), Some(20)));
        assert_eq!(reference.time_window(), Some((36000.0, 39600.0)));
        assert_eq!(reference.duration, Some(3600.0));

        let test = ctx.dataset(Side::Test);
        assert_eq!((test.ds_sac, test.ds_sic), (Some(10), Some(21)));
        assert_eq!(test.time_window(), Some((37800.0, 41400.5)));
        assert_eq!(test.duration, Some(3600.5));
        assert!(test.sensor_override.is_none());

        assert_eq!(ctx.common_time_duration, Some(1800.0));
    }

    #[test]
    fn identical_sensor_identity_gets_override() {
        let asm = scan("Loading reference run\nServer Identification: 0x0aff\nLoading test run\nServer Identification: 0x0aff\n");
        let over = asm.document().view_point_context.dataset(Side::Test).sensor_override.clone().unwrap();
        assert_eq!((over.ds_sac_override, over.ds_sic_override), (0x0a, 0x00));
    }

    #[test]
    fn disjoint_windows_have_no_common_duration() {
        let asm = scan(
            "Loading reference run\nTime of Updates: 10:00:00.000 UTC ... 11:00:00.000 UTC\n\
             Loading test run\nTime of Updates: 11:00:00.000 UTC ... 12:00:00.000 UTC\n",
        );
        assert_eq!(asm.document().view_point_context.common_time_duration, None);
    }

    #[test]
    fn lines_before_any_loading_phase_are_ignored() {
        let asm = scan("Server Identification: 0x0102\nDuration: 00:10:00.000\n");
        let reference = asm.document().view_point_context.dataset(Side::Reference);
        assert_eq!(reference.ds_sac, None);
        assert_eq!(reference.duration, None);
    }

    #[test]
    fn durations_and_windows_may_pass_one_day() {
        let asm = scan(
            "Loading reference run\n    Time of Updates: 23:00:00.000 UTC ... 24:00:00.000 UTC\n    \
             Duration: 25:30:00.000\n",
        );
        let reference = asm.document().view_point_context.dataset(Side::Reference);
        assert_eq!(reference.duration, Some(91800.0));
        assert_eq!(reference.time_window(), Some((82800.0, 86400.0)));
    }

    #[test]
    fn short_tracks_get_their_own_ids() {
        let mut asm = Assembler::new(&Options::default());
        let mut scanner = RunLogScanner::new(7);
        let line = "Deviation: Short test track #5 (reference track #9 [A:1234] [S:0xABCDEF]) \
                    starting near 11:22:33.444 UTC (diff=1.250 seconds)";
        scanner.scan_line(line, &mut asm).unwrap();
        scanner.scan_line(line, &mut asm).unwrap();

        let ids: Vec<u64> = asm.document().view_points.iter().map(|vp| vp.id).collect();
        assert_eq!(ids, vec![7, 8]);
        assert!(asm.document().view_points.iter().all(|vp| vp.kind == ViewPointType::ShortTrack));
    }

    #[test]
    fn malformed_short_track_time_is_fatal() {
        let mut asm = Assembler::new(&Options::default());
        let mut scanner = RunLogScanner::new(0);
        let line = "Deviation: Short test track #5 (reference track #9 [A:-] [S:-]) \
                    starting near 11:22 UTC (diff=1.250 seconds)";
        let err = scanner.scan_line(line, &mut asm).unwrap_err();
        assert!(matches!(err, Error::MalformedTime(ref t) if t == "11:22"));
    }
}
