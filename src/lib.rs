//! Convert AOC (ARTAS Output Comparator) diagnostics into view points.
//!
//! AOC compares a reference and a test tracker run and leaves two text
//! artifacts behind: a *helper* file with one blank-line delimited block per
//! deviation, and a *run log* with dataset metadata and short-track notices.
//! This crate scans both and produces a [`ViewPointDocument`]: run metadata
//! plus one typed [`ViewPoint`] per deviation, with filters a view-point
//! inspection tool can apply directly.
//!
//! ```
//! use aocvp::{Options, convert};
//!
//! let helper = "DEV #1: Track contents\n\
//!     Test track #12.1 (reference track #40.2) near 10:15:00.000 UTC: reported rocd=1200; expected 900\n\n";
//! let out = convert(helper, "", &Options::default()).unwrap();
//! assert_eq!(out.document.view_points.len(), 1);
//! assert_eq!(out.document.view_points[0].kind.label(), "ROCD Content Deviation");
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod model;
mod rules;

pub mod time_of_day;

pub use api::{Conversion, Options, convert, convert_readers};
pub use engine::Diagnostic;
pub use error::{Error, Result};
pub use model::{
    Dataset, Dubiousness, Filters, FORMAT_VERSION, ModeACodesFilter, SensorIdentity, SensorOverride, Side,
    TargetAddressFilter, TimeOfDayFilter, TimeOffset, Timing, ViewPoint, ViewPointContext, ViewPointDocument,
    ViewPointType,
};
pub use rules::ContentKind;

// --- Internal types ---------------------------------------------------------

/// The parsed `DEV #<n>: <type> <qualifier>` line opening a helper block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeviationHeader {
    /// Position in the helper file's own deviation sequence.
    pub id: u64,
    /// Deviation number as printed by AOC.
    pub number: String,
    pub kind: String,
    pub qualifier: String,
}

impl DeviationHeader {
    /// Registry key, `"<type> <qualifier>"`.
    pub fn key(&self) -> String {
        format!("{} {}", self.kind, self.qualifier)
    }
}

/// A complete helper-file block, header line included.
///
/// `header` is `None` when the opening line did not have the expected
/// `DEV #<n>:` shape. Lines are kept newline separated.
#[derive(Debug, Clone)]
pub(crate) struct DeviationBlock {
    pub header: Option<DeviationHeader>,
    pub text: String,
}

impl DeviationBlock {
    pub fn open(header: Option<DeviationHeader>, line: &str) -> Self {
        let mut text = String::with_capacity(256);
        text.push_str(line);
        text.push('\n');
        DeviationBlock { header, text }
    }

    pub fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Everything after the header line.
    pub fn body(&self) -> &str {
        self.text.split_once('\n').map(|(_, rest)| rest).unwrap_or("")
    }

    pub fn first_line(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }
}
