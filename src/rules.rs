//! Deviation classification rules.
//!
//! A completed helper block is classified in three layers, each backed by a
//! static table in `registry.rs`:
//!
//! 1. `"<type> <qualifier>"` from the `DEV` header selects a [`DeviationKind`]
//!    (extra track, missing track, track contents). If the header key is not
//!    registered, the block body is searched for a registered key instead.
//! 2. For track contents, the field named in a `reported K=V1; expected V2`
//!    clause selects a [`ContentKind`].
//! 3. Otherwise an `unexpected ...` clause is prefix-matched against a short
//!    ordered vocabulary.
//!
//! Builders are permissive: a body that does not match a builder's pattern
//! still yields a record, with `text` unset and empty filters. Only timestamps
//! needed for arithmetic are allowed to fail the run.

pub(crate) mod content;
mod helpers;
pub(crate) mod patterns;
mod registry;
pub(crate) mod short_track;
mod track;


pub use registry::ContentKind;
pub(crate) use registry::DeviationKind;

use crate::engine::Diagnostic;
use crate::model::ViewPoint;
use crate::{DeviationBlock, Options, Result};

/// What a completed block turned into.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Classification {
    ViewPoint(ViewPoint),
    Unrecognized(Diagnostic),
    /// Recognized but not worth a record (section banners, content blocks
    /// without the expected preamble).
    Ignored,
}

const SECTION_BANNER: &str = "deviations by type";

pub(crate) fn classify_block(block: &DeviationBlock, options: &Options) -> Result<Classification> {
    let Some(header) = &block.header else {
        if block.first_line().trim_start().to_ascii_lowercase().starts_with(SECTION_BANNER) {
            return Ok(Classification::Ignored);
        }
        return Ok(Classification::Unrecognized(Diagnostic::MalformedPreamble { text: block.text.clone() }));
    };

    let key = header.key();
    let kind = registry::deviation_kind(&key).or_else(|| registry::deviation_kind_in(block.body()));
    let Some(kind) = kind else {
        return Ok(Classification::Unrecognized(Diagnostic::UnknownDeviation { number: header.number.clone(), key }));
    };
    tracing::debug!(number = %header.number, ?kind, "classify deviation");

    match kind {
        DeviationKind::ExtraTrack | DeviationKind::MissingTrack => {
            Ok(Classification::ViewPoint(track::build(kind, header, &block.text, options)))
        },
        DeviationKind::TrackContents => content::classify(header, &block.text, options),
    }
}
