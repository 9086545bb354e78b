//! Helper-file scanning and deviation block accumulation.
//!
//! The helper file interleaves a few single-line header tokens with
//! multi-line deviation blocks. A line is classified by its first three
//! characters:
//!
//! | prefix | meaning                                   |
//! |--------|-------------------------------------------|
//! | `AOC`  | tool version                              |
//! | `DEV`  | start of a deviation block                |
//! | `DT `  | measured test time offset                 |
//! | `NOW`  | generation timestamp                      |
//! | `REF`  | reference recording filename              |
//! | `TST`  | test recording filename                   |
//!
//! Any other non-blank line is appended to the open block, if there is one.
//! A blank line, the next `DEV` line, or the end of input closes the open
//! block and hands it to `rules::classify_block`.
//!
//! Header-token lines inside an open block are consumed as header tokens and
//! do not end the block.

use super::{Assembler, Diagnostic};
use crate::model::Side;
use crate::rules::{self, Classification, patterns};
use crate::{DeviationBlock, DeviationHeader, Result};

/// Header tokens recognized by line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderToken {
    Version,
    Deviation,
    TimeOffset,
    Now,
    ReferenceFile,
    TestFile,
}

impl HeaderToken {
    const VOCABULARY: &'static [(&'static str, HeaderToken)] = &[
        ("AOC", HeaderToken::Version),
        ("DEV", HeaderToken::Deviation),
        ("DT ", HeaderToken::TimeOffset),
        ("NOW", HeaderToken::Now),
        ("REF", HeaderToken::ReferenceFile),
        ("TST", HeaderToken::TestFile),
    ];

    fn of(line: &str) -> Option<HeaderToken> {
        let prefix = line.get(..3)?;
        HeaderToken::VOCABULARY.iter().find(|(token, _)| *token == prefix).map(|(_, t)| *t)
    }
}

#[derive(Debug, Default)]
pub(crate) struct HelperScanner {
    open: Option<DeviationBlock>,
}

impl HelperScanner {
    pub fn new() -> Self {
        HelperScanner::default()
    }

    pub fn scan_line(&mut self, line: &str, assembler: &mut Assembler) -> Result<()> {
        match HeaderToken::of(line) {
            Some(HeaderToken::Deviation) => {
                self.close(assembler)?;
                let header = parse_header(line, assembler);
                self.open = Some(DeviationBlock::open(header, line));
            },
            Some(token) => header_token(token, line, assembler),
            None if line.trim().is_empty() => self.close(assembler)?,
            None => {
                if let Some(block) = self.open.as_mut() {
                    block.push_line(line);
                }
            },
        }
        Ok(())
    }

    /// Flush a block still open at end of input.
    pub fn finish(&mut self, assembler: &mut Assembler) -> Result<()> {
        self.close(assembler)
    }

    fn close(&mut self, assembler: &mut Assembler) -> Result<()> {
        let Some(block) = self.open.take() else { return Ok(()) };

        match rules::classify_block(&block, assembler.options())? {
            Classification::ViewPoint(view_point) => assembler.push_view_point(view_point),
            Classification::Unrecognized(diagnostic) => assembler.report(diagnostic),
            Classification::Ignored => {
                tracing::debug!(block = block.first_line(), "deviation block produced no view point");
            },
        }
        Ok(())
    }
}

/// A helper id is consumed only for well-formed headers.
fn parse_header(line: &str, assembler: &mut Assembler) -> Option<DeviationHeader> {
    let caps = patterns::deviation_header().captures(line)?;
    Some(DeviationHeader {
        id: assembler.next_helper_id(),
        number: caps[1].to_string(),
        kind: caps[2].to_string(),
        qualifier: caps[3].to_string(),
    })
}

fn header_token(token: HeaderToken, line: &str, assembler: &mut Assembler) {
    let context = assembler.context_mut();
    match token {
        HeaderToken::Version => {
            if let Some(caps) = patterns::aoc_version().captures(line) {
                context.aoc_version = Some(caps[1].to_string());
            }
        },
        HeaderToken::Now => {
            if let Some(caps) = patterns::time_now().captures(line) {
                context.time_now = Some(caps[1].to_string());
            }
        },
        HeaderToken::ReferenceFile | HeaderToken::TestFile => {
            let side = if token == HeaderToken::ReferenceFile { Side::Reference } else { Side::Test };
            if let Some(caps) = patterns::quoted_filename().captures(line) {
                context.dataset_mut(side).filename = Some(caps[1].to_string());
            }
        },
        HeaderToken::TimeOffset => {
            let Some(caps) = patterns::time_offset().captures(line) else { return };
            match (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
                (Ok(offset), Ok(stddev)) => {
                    let test = context.dataset_mut(Side::Test);
                    let time_offset = test.time_offset.get_or_insert_with(Default::default);
                    time_offset.time_offset = Some(offset);
                    time_offset.time_offset_stddev = Some(stddev);
                },
                _ => assembler.report(Diagnostic::InvalidTimeOffset { line: line.to_string() }),
            }
        },
        HeaderToken::Deviation => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ViewPointType;
    use crate::{Options, ViewPoint};

    fn scan(text: &str) -> (Vec<ViewPoint>, Vec<Diagnostic>, Assembler) {
        let mut asm = Assembler::new(&Options::default());
        let mut scanner = HelperScanner::new();
        for line in text.lines() {
            scanner.scan_line(line, &mut asm).unwrap();
        }
        scanner.finish(&mut asm).unwrap();
        (asm.document().view_points.clone(), asm.diagnostics().to_vec(), asm)
    }

    const EXTRA: &str = "DEV #3: Extra test\n\
        Extra test track #7.2\n\
        \x20 Time of first update: 10:00:00.000 UTC\n\
        \x20 Time of last update: 10:00:05.000 UTC\n";

    #[test]
    fn header_tokens_fill_context() {
        let (_, diagnostics, asm) = scan(
            "AOC Version V4.2.1\nNOW 2024-05-06 07:08:09 UTC\nREF \"ref.rec\" (reference)\nTST \"tst.rec\"\n\
             DT 0.125 secs (STD 0.010 secs)\n",
        );
        let ctx = &asm.document().view_point_context;
        assert_eq!(ctx.aoc_version.as_deref(), Some("4.2.1"));
        assert_eq!(ctx.time_now.as_deref(), Some("2024-05-06 07:08:09"));
        assert_eq!(ctx.dataset(Side::Reference).filename.as_deref(), Some("ref.rec"));
        assert_eq!(ctx.dataset(Side::Test).filename.as_deref(), Some("tst.rec"));
        let offset = ctx.dataset(Side::Test).time_offset.clone().unwrap();
        assert_eq!(offset.time_offset, Some(0.125));
        assert_eq!(offset.time_offset_stddev, Some(0.01));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unreadable_time_offset_is_reported() {
        let (_, diagnostics, _) = scan("DT n/a secs (STD n/a secs)\n");
        assert_eq!(diagnostics, vec![Diagnostic::InvalidTimeOffset { line: "DT n/a secs (STD n/a secs)".to_string() }]);
    }

    #[test]
    fn blank_line_closes_block() {
        let (vps, _, _) = scan(&format!("{EXTRA}\n"));
        assert_eq!(vps.len(), 1);
        assert_eq!(vps[0].id, 0);
        assert_eq!(vps[0].deviations, vec!["3"]);
    }

    #[test]
    fn open_block_is_flushed_at_end_of_input() {
        let (vps, _, _) = scan(EXTRA);
        assert_eq!(vps.len(), 1);
    }

    #[test]
    fn next_deviation_header_closes_previous_block() {
        let second = EXTRA.replace("#3", "#4").replace("#7.2", "#8.1");
        let (vps, _, _) = scan(&format!("{EXTRA}{second}"));
        assert_eq!(vps.len(), 2);
        assert_eq!(vps.iter().map(|vp| vp.id).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(vps[1].deviations, vec!["4"]);
        assert_eq!(vps[1].filters.track_number("TST"), Some("8"));
    }

    #[test]
    fn lines_outside_blocks_are_ignored() {
        let (vps, diagnostics, _) = scan("some banner\n\nExtra test track #1.1\n\n");
        assert!(vps.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unknown_key_is_reported_and_skipped() {
        let (vps, diagnostics, asm) = scan(&format!("DEV #1: Foo bar\nnothing to see\n\n{EXTRA}\n"));
        assert_eq!(vps.len(), 1);
        assert_eq!(vps[0].kind, ViewPointType::ExtraTrack(crate::Dubiousness::Clear));
        // The unknown block still consumed an id.
        assert_eq!(vps[0].id, 1);
        assert_eq!(diagnostics, vec![Diagnostic::UnknownDeviation { number: "1".to_string(), key: "Foo bar".to_string() }]);
        assert_eq!(asm.helper_ids().peek(), 2);
    }

    #[test]
    fn malformed_preamble_is_reported_but_banner_is_not() {
        let (vps, diagnostics, asm) = scan("DEVIATIONS BY TYPE\n\nDEV without number\n\n");
        assert!(vps.is_empty());
        assert_eq!(diagnostics, vec![Diagnostic::MalformedPreamble { text: "DEV without number\n".to_string() }]);
        assert_eq!(asm.helper_ids().peek(), 0);
    }
}
