//! Output document model.
//!
//! The layout mirrors the JSON consumed by the view-point inspection tool:
//! field order, key spelling and the difference between an absent key and a
//! `null` value are all part of the format.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::Result;
use crate::rules::ContentKind;

/// Document format version written into every context.
pub const FORMAT_VERSION: &str = "0.1";

/// Which of the two compared runs something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Reference,
    Test,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Reference => Side::Test,
            Side::Test => Side::Reference,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Reference => 0,
            Side::Test => 1,
        }
    }
}

/// The whole conversion output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPointDocument {
    pub view_point_context: ViewPointContext,
    pub view_points: Vec<ViewPoint>,
}

impl ViewPointDocument {
    pub fn new(reference_name: &str, test_name: &str, start_date: Option<&str>) -> Self {
        ViewPointDocument {
            view_point_context: ViewPointContext {
                version: FORMAT_VERSION.to_string(),
                aoc_version: None,
                start_date: start_date.map(str::to_string),
                time_now: None,
                common_time_duration: None,
                datasets: [Dataset::reference(reference_name), Dataset::test(test_name)],
            },
            view_points: Vec::new(),
        }
    }

    /// Render with 4-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Run-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPointContext {
    pub version: String,
    pub aoc_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    pub time_now: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_time_duration: Option<f64>,
    pub datasets: [Dataset; 2],
}

impl ViewPointContext {
    pub fn dataset(&self, side: Side) -> &Dataset {
        &self.datasets[side.index()]
    }

    pub fn dataset_mut(&mut self, side: Side) -> &mut Dataset {
        &mut self.datasets[side.index()]
    }
}

/// A two-byte data source code (SAC/SIC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorIdentity {
    pub sac: u8,
    pub sic: u8,
}

impl SensorIdentity {
    /// Same SAC, SIC bumped by one (wrapping), so two identical sources can be
    /// told apart downstream.
    pub fn disambiguated(self) -> SensorIdentity {
        SensorIdentity { sac: self.sac, sic: self.sic.wrapping_add(1) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub name: String,
    pub ds_name: String,
    pub filename: Option<String>,
    #[serde(flatten)]
    pub time_offset: Option<TimeOffset>,
    pub ds_sac: Option<u8>,
    pub ds_sic: Option<u8>,
    pub time_start: Option<f64>,
    pub time_end: Option<f64>,
    pub duration: Option<f64>,
    #[serde(flatten)]
    pub sensor_override: Option<SensorOverride>,
}

impl Dataset {
    fn reference(ds_name: &str) -> Self {
        Dataset::blank("reference_run", ds_name, None)
    }

    fn test(ds_name: &str) -> Self {
        Dataset::blank("test_run", ds_name, Some(TimeOffset::default()))
    }

    fn blank(name: &str, ds_name: &str, time_offset: Option<TimeOffset>) -> Self {
        Dataset {
            name: name.to_string(),
            ds_name: ds_name.to_string(),
            filename: None,
            time_offset,
            ds_sac: None,
            ds_sic: None,
            time_start: None,
            time_end: None,
            duration: None,
            sensor_override: None,
        }
    }

    pub fn sensor_identity(&self) -> Option<SensorIdentity> {
        Some(SensorIdentity { sac: self.ds_sac?, sic: self.ds_sic? })
    }

    pub fn set_sensor_identity(&mut self, identity: SensorIdentity) {
        self.ds_sac = Some(identity.sac);
        self.ds_sic = Some(identity.sic);
    }

    /// `(start, end)` once both are known.
    pub fn time_window(&self) -> Option<(f64, f64)> {
        Some((self.time_start?, self.time_end?))
    }
}

/// Measured clock offset of the test run against the reference run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeOffset {
    pub time_offset: Option<f64>,
    pub time_offset_stddev: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorOverride {
    pub ds_sac_override: u8,
    pub ds_sic_override: u8,
}

impl From<SensorIdentity> for SensorOverride {
    fn from(identity: SensorIdentity) -> Self {
        SensorOverride { ds_sac_override: identity.sac, ds_sic_override: identity.sic }
    }
}

/// Label of a view point, serialized as its display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPointType {
    ExtraTrack(Dubiousness),
    MissingTrack(Dubiousness),
    ShortTrack,
    Content(ContentKind),
}

/// How many candidate counterparts AOC found for an unmatched track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dubiousness {
    Clear,
    Single,
    Multiple,
}

impl ViewPointType {
    pub fn label(self) -> String {
        let suffix = |d: Dubiousness| match d {
            Dubiousness::Clear => "",
            Dubiousness::Single => " dubious",
            Dubiousness::Multiple => " dubious multiple",
        };
        match self {
            ViewPointType::ExtraTrack(d) => format!("Extra Track{}", suffix(d)),
            ViewPointType::MissingTrack(d) => format!("Missing Track{}", suffix(d)),
            ViewPointType::ShortTrack => "Short Track".to_string(),
            ViewPointType::Content(kind) => format!("{} Content Deviation", kind.abbreviation()),
        }
    }
}

impl Serialize for ViewPointType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// One structured deviation record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPoint {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ViewPointType,
    pub name: String,
    pub text: Option<String>,
    #[serde(flatten)]
    pub timing: Option<Timing>,
    pub db_objects: Vec<String>,
    pub filters: Filters,
    pub deviations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_variables: Option<BTreeMap<String, Vec<String>>>,
}

/// Point in time and window length, both seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timing {
    pub time: Option<f64>,
    pub time_window: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Filters {
    #[serde(rename = "Time of Day", skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDayFilter>,
    /// Keyed `"<tracker name> track_num"`.
    #[serde(rename = "Tracker Track Number")]
    pub track_numbers: BTreeMap<String, String>,
    #[serde(rename = "Mode 3/A Codes", skip_serializing_if = "Option::is_none")]
    pub mode_3a_codes: Option<ModeACodesFilter>,
    #[serde(rename = "Target Address", skip_serializing_if = "Option::is_none")]
    pub target_address: Option<TargetAddressFilter>,
}

impl Filters {
    pub fn set_track_number(&mut self, tracker: &str, value: impl Into<String>) {
        self.track_numbers.insert(track_number_key(tracker), value.into());
    }

    pub fn track_number(&self, tracker: &str) -> Option<&str> {
        self.track_numbers.get(&track_number_key(tracker)).map(String::as_str)
    }
}

fn track_number_key(tracker: &str) -> String {
    format!("{tracker} track_num")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeOfDayFilter {
    #[serde(rename = "Time of Day Minimum")]
    pub minimum: Option<String>,
    #[serde(rename = "Time of Day Maximum")]
    pub maximum: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeACodesFilter {
    #[serde(rename = "Mode 3/A Codes Values")]
    pub values: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetAddressFilter {
    #[serde(rename = "Target Address Values")]
    pub values: String,
}
