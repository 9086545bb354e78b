//! Scanning engine.
//!
//! The engine owns the two sequential passes over the AOC artifacts and the
//! state they share. Classification of individual deviations lives in
//! `crate::rules`; this module only decides *when* a rule is asked and *where*
//! its result goes.
//!
//! ## How the parts work together
//!
//! ```text
//! helper file ── HelperScanner (helper.rs)
//!                  - header tokens (AOC/DEV/DT /NOW/REF/TST)
//!                  - DeviationBlock accumulation, blank-line delimited
//!                  - rules::classify_block ──┐
//!                                            v
//!                                    Assembler (assembler.rs)
//!                                      - ViewPointDocument
//!                                      - helper + short-track IdSequence
//!                                      - diagnostics
//!                                            ^
//! run log ───── RunLogScanner (run_log.rs)   │
//!                  - LineTriggers::scan (trigger.rs)
//!                  - Phase state machine (phase.rs)
//!                  - dataset attributes, short tracks ──┘
//! ```
//!
//! The helper file is scanned to completion before the run log is read. The
//! short-track id sequence starts where the helper sequence ended, so ids stay
//! unique across the document even though the two passes are unrelated.
//!
//! ## Error policy
//!
//! Recognition failures become [`Diagnostic`]s and the scan goes on. Only a
//! timestamp that must be parsed for arithmetic and cannot be parsed, or an I/O
//! failure on the input, ends the run with an [`Error`](crate::Error).

mod assembler;
mod diagnostics;
mod helper;
mod phase;
mod run_log;
mod trigger;

pub(crate) use assembler::{Assembler, IdSequence};
pub use diagnostics::Diagnostic;
pub(crate) use helper::HelperScanner;
pub(crate) use phase::Phase;
pub(crate) use run_log::RunLogScanner;
pub(crate) use trigger::LineTriggers;

use crate::{Options, Result};
use std::io::BufRead;

/// Scan the helper file, then the run log, into one assembler.
pub(crate) fn run(helper: impl BufRead, run_log: impl BufRead, options: &Options) -> Result<Assembler> {
    let mut assembler = Assembler::new(options);

    let mut scanner = HelperScanner::new();
    for line in helper.lines() {
        scanner.scan_line(&line?, &mut assembler)?;
    }
    scanner.finish(&mut assembler)?;
    tracing::debug!(view_points = assembler.document().view_points.len(), "helper file scanned");

    let mut scanner = RunLogScanner::new(assembler.helper_ids().peek());
    for line in run_log.lines() {
        scanner.scan_line(&line?, &mut assembler)?;
    }
    tracing::debug!(phase = ?scanner.phase(), "run log scanned");

    Ok(assembler)
}
