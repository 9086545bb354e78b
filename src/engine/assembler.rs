//! Incremental document assembly.
//!
//! Every handler in the two scanners writes through an [`Assembler`]. There is
//! no merge step: the document is complete once both passes have run.
//!
//! ## Invariants
//!
//! - The test dataset carries a sensor override iff its sensor identity equals
//!   the reference one. Both setters re-evaluate this.
//! - `common_time_duration` is present iff both time windows are known and
//!   overlap. Both setters re-evaluate this once both windows are known.

use super::Diagnostic;
use crate::model::{SensorIdentity, Side, ViewPoint, ViewPointContext, ViewPointDocument};
use crate::time_of_day;
use crate::Options;

/// A monotonically increasing view-point id counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn starting_at(first: u64) -> Self {
        IdSequence { next: first }
    }

    /// Hand out the current id and advance.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to [`IdSequence::next_id`] will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

#[derive(Debug)]
pub(crate) struct Assembler {
    options: Options,
    document: ViewPointDocument,
    helper_ids: IdSequence,
    diagnostics: Vec<Diagnostic>,
}

impl Assembler {
    pub fn new(options: &Options) -> Self {
        let document =
            ViewPointDocument::new(&options.reference_name, &options.test_name, options.start_date.as_deref());
        Assembler { options: options.clone(), document, helper_ids: IdSequence::starting_at(0), diagnostics: Vec::new() }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn document(&self) -> &ViewPointDocument {
        &self.document
    }

    pub fn context_mut(&mut self) -> &mut ViewPointContext {
        &mut self.document.view_point_context
    }

    pub fn helper_ids(&self) -> IdSequence {
        self.helper_ids
    }

    pub fn next_helper_id(&mut self) -> u64 {
        self.helper_ids.next_id()
    }

    pub fn push_view_point(&mut self, view_point: ViewPoint) {
        tracing::debug!(id = view_point.id, kind = %view_point.kind.label(), "view point");
        self.document.view_points.push(view_point);
    }

    #[cfg(test)]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    pub fn set_sensor_identity(&mut self, side: Side, identity: SensorIdentity) {
        let context = self.context_mut();
        context.dataset_mut(side).set_sensor_identity(identity);

        let reference = context.dataset(Side::Reference).sensor_identity();
        let test = context.dataset_mut(Side::Test);
        test.sensor_override = match (reference, test.sensor_identity()) {
            (Some(r), Some(t)) if r == t => Some(t.disambiguated().into()),
            _ => None,
        };
    }

    pub fn set_time_window(&mut self, side: Side, start: f64, end: f64) {
        let context = self.context_mut();
        let dataset = context.dataset_mut(side);
        dataset.time_start = Some(start);
        dataset.time_end = Some(end);

        let windows = (context.dataset(Side::Reference).time_window(), context.dataset(Side::Test).time_window());
        if let (Some((ref_start, ref_end)), Some((test_start, test_end))) = windows {
            context.common_time_duration = time_of_day::overlap(ref_start, ref_end, test_start, test_end);
        }
    }

    pub fn into_parts(self) -> (ViewPointDocument, Vec<Diagnostic>) {
        (self.document, self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembler() -> Assembler {
        Assembler::new(&Options::default())
    }

    #[test]
    fn id_sequence_counts_up_from_start() {
        let mut ids = IdSequence::starting_at(3);
        assert_eq!(ids.peek(), 3);
        assert_eq!(ids.next_id(), 3);
        assert_eq!(ids.next_id(), 4);
        assert_eq!(ids.peek(), 5);
    }

    #[test]
    fn override_is_set_only_for_identical_identities() {
        let mut asm = assembler();
        asm.set_sensor_identity(Side::Reference, SensorIdentity { sac: 0x12, sic: 0x34 });
        asm.set_sensor_identity(Side::Test, SensorIdentity { sac: 0x12, sic: 0x35 });
        assert!(asm.document().view_point_context.dataset(Side::Test).sensor_override.is_none());

        asm.set_sensor_identity(Side::Test, SensorIdentity { sac: 0x12, sic: 0x34 });
        let test = asm.document().view_point_context.dataset(Side::Test);
        let over = test.sensor_override.as_ref().unwrap();
        assert_eq!((over.ds_sac_override, over.ds_sic_override), (0x12, 0x35));
        assert_eq!((test.ds_sac, test.ds_sic), (Some(0x12), Some(0x34)));
    }

    #[test]
    fn override_wraps_and_clears_when_reference_changes() {
        let mut asm = assembler();
        asm.set_sensor_identity(Side::Reference, SensorIdentity { sac: 1, sic: 255 });
        asm.set_sensor_identity(Side::Test, SensorIdentity { sac: 1, sic: 255 });
        let over = asm.document().view_point_context.dataset(Side::Test).sensor_override.clone().unwrap();
        assert_eq!(over.ds_sic_override, 0);

        asm.set_sensor_identity(Side::Reference, SensorIdentity { sac: 2, sic: 255 });
        assert!(asm.document().view_point_context.dataset(Side::Test).sensor_override.is_none());
    }

    #[test]
    fn common_duration_follows_overlap() {
        let mut asm = assembler();
        asm.set_time_window(Side::Reference, 100.0, 200.0);
        assert_eq!(asm.document().view_point_context.common_time_duration, None);

        asm.set_time_window(Side::Test, 150.5, 300.0);
        assert_eq!(asm.document().view_point_context.common_time_duration, Some(49.5));

        asm.set_time_window(Side::Test, 200.0, 300.0);
        assert_eq!(asm.document().view_point_context.common_time_duration, None);
    }

    #[test]
    fn report_collects_diagnostics() {
        let mut asm = assembler();
        asm.report(Diagnostic::MalformedPreamble { text: "DEVX".to_string() });
        let (_, diagnostics) = asm.into_parts();
        assert_eq!(diagnostics.len(), 1);
    }
}
