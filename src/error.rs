//! Error types for the converter.
//!
//! Only failures that make the output meaningless are errors. Structural
//! recognition problems in the AOC text are reported as
//! [`Diagnostic`](crate::Diagnostic)s instead and never abort a scan.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed time of day '{0}' (expected HH:MM:SS.mmm)")]
    MalformedTime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
