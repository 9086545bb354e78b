use serde::Serialize;
use std::fmt;

/// A non-fatal recognition problem found while scanning.
///
/// Diagnostics never stop a scan and never add a view point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A well-formed `DEV` header whose `<type> <qualifier>` is not registered.
    UnknownDeviation { number: String, key: String },
    /// A block opened by a `DEV` line that is not a deviation header.
    MalformedPreamble { text: String },
    /// A `reported` content deviation whose field is unknown (or missing).
    UnknownReportedField { number: String, field: Option<String> },
    /// An `unexpected` content deviation whose payload is unknown (or missing).
    UnknownUnexpectedValue { number: String, value: Option<String> },
    /// A `DT` line whose offset or deviation is not a number.
    InvalidTimeOffset { line: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownDeviation { number, key } => {
                write!(f, "deviation #{number}: no definition for '{key}'")
            },
            Diagnostic::MalformedPreamble { text } => write!(f, "unexpected deviation preamble: {}", first_line(text)),
            Diagnostic::UnknownReportedField { number, field: Some(field) } => {
                write!(f, "deviation #{number}: no definition for reported field '{field}'")
            },
            Diagnostic::UnknownReportedField { number, field: None } => {
                write!(f, "deviation #{number}: missing 'reported ...; expected ...' clause")
            },
            Diagnostic::UnknownUnexpectedValue { number, value: Some(value) } => {
                write!(f, "deviation #{number}: no definition for unexpected '{value}'")
            },
            Diagnostic::UnknownUnexpectedValue { number, value: None } => {
                write!(f, "deviation #{number}: missing 'unexpected ...' clause")
            },
            Diagnostic::InvalidTimeOffset { line } => write!(f, "unreadable time offset: {line}"),
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
