//! Pattern vocabulary for AOC diagnostic text.
//!
//! Every phrasing the converter understands is listed here. Block patterns run
//! against newline-separated block text; anything that has to span lines says
//! so with `\s+` or `(?s)`.

// --- Helper file: header tokens ----------------------------------------------

pattern! {
    /// `AOC Version V4.2.1`
    aoc_version => r"^AOC\s+Version\s+V(\S+)$",
    /// `NOW 2024-05-06 07:08:09 UTC`
    time_now => r"^NOW\s+(\S+ \S+)\s+UTC$",
    /// `REF "reference.rec"`
    quoted_filename => r#""(\S+)""#,
    /// `DT 0.125 secs (STD 0.010 secs)`
    time_offset => r"^DT\s+(\S+)\s+secs\s+\(STD\s+(\S+)\s+secs\)$",
    /// `DEV #12: Extra test`
    deviation_header => r"^DEV\s+#(\d+):\s+(\S+)\s+(\S+)",
}

// --- Helper file: deviation bodies -------------------------------------------

pattern! {
    extra_track => r"Extra test track #(\d+)\.(\d+)\s+Time of [^:\n]+: (\S+) UTC\s+Time of [^:\n]+: (\S+) UTC",
    missing_track => r"Missing reference track #(\d+)\.(\d+)\s+Time of [^:\n]+: (\S+) UTC\s+Time of [^:\n]+: (\S+) UTC",
    /// `searching ... 2 candidates found`, possibly across lines.
    track_candidates => r"(?s)searching \.\.\..*?(\S+)\s+candidates?\s+found",
    track_number_ref => r"#(\d+)\.",
    mode_3a_value => r"SSR mode 3/A code; value=0(\d+)",
    aircraft_address_value => r"aircraft address; value=0x(\S+)",
    mode_c_value => r"SSR mode C code; value=(\S+)",
    /// `Test track #12.1 (reference track #40.2) near 10:15:00.000 UTC: reported ...`
    track_contents => r"Test track #(\d+)\.(\d+) \(reference track #(\d+)\.(\d+)\) near (\d{2}:\d{2}:\d{2}\.\d{3}) UTC:\s+(\w+)\s",
    /// `reported rocd=1200; expected 900`, optionally followed by a `REF` column.
    reported_clause => r"(?m)\sreported ([\w.]+)=(.+?); expected (.+?)(?:\s+REF|\s*$)",
    unexpected_clause => r"(?m)\sunexpected (.+?)(?:\s+REF|\s*$)",
    bracketed_time => r"\[(\d{2}:\d{2}:\d{2}\.\d{3})\]",
}

// --- Run log -----------------------------------------------------------------

pattern! {
    /// First `0xSSCC` on a `Server Identification:` line.
    sensor_identity => r"0x([[:xdigit:]]{2})([[:xdigit:]]{2})",
    update_window => r"(\d{2}:\d{2}:\d{2}\.\d{3})\s+UTC\s+\.\.\.\s+(\d{2}:\d{2}:\d{2}\.\d{3})\s+UTC",
    duration => r"\s(\d{2}:\d{2}:\d{2}\.\d{3})(?:\s|$)",
    short_track => r"Short (\w+) track #(\d+) \((\w+) track #(\d+) \[A:([^\]]+)\] \[S:([^\]]+)\]\) starting near (\S+) UTC \(diff=([\d.]+)\s+seconds\)\s*$",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deviation_header_splits_type_and_qualifier() {
        let caps = deviation_header().captures("DEV #12: Track contents (3 updates)").unwrap();
        assert_eq!((&caps[1], &caps[2], &caps[3]), ("12", "Track", "contents"));
        assert!(deviation_header().captures("DEVIATIONS BY TYPE").is_none());
    }

    #[test]
    fn reported_clause_stops_at_ref_column_or_line_end() {
        let caps = reported_clause().captures(": reported rocd=1200; expected 900\n    REF [10:00:00.000]").unwrap();
        assert_eq!((&caps[1], &caps[2], &caps[3]), ("rocd", "1200", "900"));

        let caps = reported_clause().captures(": reported status.cst=1; expected 0 REF x").unwrap();
        assert_eq!((&caps[1], &caps[2], &caps[3]), ("status.cst", "1", "0"));

        let caps = reported_clause().captures(": reported tmc=5 ft; expected 0 ft\nnext").unwrap();
        assert_eq!((&caps[2], &caps[3]), ("5 ft", "0 ft"));
    }

    #[test]
    fn candidates_may_span_lines() {
        let caps = track_candidates().captures("searching ...\n   2 candidates found").unwrap();
        assert_eq!(&caps[1], "2");
        let caps = track_candidates().captures("searching ... no candidate found").unwrap();
        assert_eq!(&caps[1], "no");
    }

    #[test]
    fn sensor_identity_reads_two_bytes() {
        let caps = sensor_identity().captures("Server Identification: 0x0A1b (SAC/SIC)").unwrap();
        assert_eq!((&caps[1], &caps[2]), ("0A", "1b"));
    }

    #[test]
    fn duration_accepts_stamp_at_line_end() {
        assert_eq!(&duration().captures("Duration: 01:02:03.004").unwrap()[1], "01:02:03.004");
        assert_eq!(&duration().captures("Duration: 01:02:03.004 (3723 s)").unwrap()[1], "01:02:03.004");
    }
}
