use crate::engine::{self, Diagnostic};
use crate::model::{Side, ViewPointDocument};
use crate::Result;
use std::io::BufRead;

/// Conversion settings supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Display name of the reference tracker; keys its track-number filters.
    pub reference_name: String,
    /// Display name of the test tracker; keys its track-number filters.
    pub test_name: String,
    /// Passed through to the document context when set.
    pub start_date: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options { reference_name: "REF".to_string(), test_name: "TST".to_string(), start_date: None }
    }
}

impl Options {
    pub fn tracker_name(&self, side: Side) -> &str {
        match side {
            Side::Reference => &self.reference_name,
            Side::Test => &self.test_name,
        }
    }
}

/// Result from [`convert`] and [`convert_readers`].
#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: ViewPointDocument,
    /// Recognition problems met along the way, in encounter order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert helper-file and run-log contents held in memory.
///
/// # Example
/// ```
/// use aocvp::{Options, convert};
///
/// let run_log = "Loading reference run\n    Server Identification: 0x0a14\n";
/// let out = convert("", run_log, &Options::default()).unwrap();
/// assert_eq!(out.document.view_point_context.datasets[0].ds_sic, Some(0x14));
/// ```
pub fn convert(helper: &str, run_log: &str, options: &Options) -> Result<Conversion> {
    convert_readers(helper.as_bytes(), run_log.as_bytes(), options)
}

/// Convert from two line-oriented readers; the helper file is read first.
pub fn convert_readers(helper: impl BufRead, run_log: impl BufRead, options: &Options) -> Result<Conversion> {
    let assembler = engine::run(helper, run_log, options)?;
    let (document, diagnostics) = assembler.into_parts();
    tracing::info!(
        view_points = document.view_points.len(),
        diagnostics = diagnostics.len(),
        "conversion finished"
    );
    Ok(Conversion { document, diagnostics })
}
