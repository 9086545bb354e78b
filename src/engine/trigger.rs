//! Run-log line triggers.
//!
//! Each run-log line is scanned once for the fixed substrings that activate a
//! handler. The result is a bit set so that a line carrying several markers
//! fires every matching handler, in vocabulary order.
//!
//! ## Extension points
//!
//! - Adding a handler:
//!   1. Add a `LineTriggers` bit.
//!   2. Add a row to `LineTriggers::VOCABULARY`.
//!   3. Teach `RunLogScanner::scan_line` (in `run_log.rs`) to act on it.

use super::Phase;

bitflags::bitflags! {
    /// Handlers activated by a single run-log line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LineTriggers: u8 {
        const PHASE_HEADER          = 1 << 0;
        const SERVER_IDENTIFICATION = 1 << 1;
        const TIME_OF_UPDATES       = 1 << 2;
        const DURATION              = 1 << 3;
        const SHORT_TRACK           = 1 << 4;
    }
}

impl LineTriggers {
    /// Attribute markers, checked after the section headers.
    pub const VOCABULARY: &'static [(&'static str, LineTriggers)] = &[
        ("Server Identification:", LineTriggers::SERVER_IDENTIFICATION),
        ("Time of Updates:", LineTriggers::TIME_OF_UPDATES),
        ("Duration:", LineTriggers::DURATION),
        ("Deviation: Short", LineTriggers::SHORT_TRACK),
    ];

    pub fn scan(line: &str) -> Self {
        let mut triggers = LineTriggers::empty();

        if Phase::from_header(line).is_some() {
            triggers |= LineTriggers::PHASE_HEADER;
        }

        for (marker, trigger) in LineTriggers::VOCABULARY {
            if line.contains(marker) {
                triggers |= *trigger;
            }
        }

        triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_trigger_nothing() {
        assert!(LineTriggers::scan("").is_empty());
        assert!(LineTriggers::scan("  12 tracks read").is_empty());
    }

    #[test]
    fn markers_are_found_anywhere_in_line() {
        assert_eq!(LineTriggers::scan("    Server Identification: 0x0a0b"), LineTriggers::SERVER_IDENTIFICATION);
        assert_eq!(
            LineTriggers::scan("Deviation: Short test track #5 (reference track #9 [A:-] [S:-])"),
            LineTriggers::SHORT_TRACK
        );
        assert_eq!(LineTriggers::scan("Loading test run"), LineTriggers::PHASE_HEADER);
    }

    #[test]
    fn one_line_can_fire_several_handlers() {
        let triggers = LineTriggers::scan("Time of Updates: 10:00:00.000 UTC ... 11:00:00.000 UTC Duration: 01:00:00.000 ");
        assert!(triggers.contains(LineTriggers::TIME_OF_UPDATES | LineTriggers::DURATION));
        assert!(!triggers.contains(LineTriggers::SHORT_TRACK));
    }
}
