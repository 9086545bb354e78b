//! Dispatch tables.
//!
//! All three classification layers are plain static tables mapping a key to a
//! kind. New phrasings are added as rows; the control flow in `rules.rs` and
//! `content.rs` does not change.

/// Top-level deviation kinds found in the helper file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum DeviationKind {
    ExtraTrack,
    MissingTrack,
    TrackContents,
}

/// `"<type> <qualifier>"` keys, also searched for in block bodies.
const DEVIATION_KINDS: &[(&str, DeviationKind)] = &[
    ("Extra test", DeviationKind::ExtraTrack),
    ("Missing reference", DeviationKind::MissingTrack),
    ("Track contents", DeviationKind::TrackContents),
];

pub(crate) fn deviation_kind(key: &str) -> Option<DeviationKind> {
    DEVIATION_KINDS.iter().find(|(k, _)| *k == key).map(|(_, kind)| *kind)
}

/// First registered key mentioned anywhere in `body`.
pub(crate) fn deviation_kind_in(body: &str) -> Option<DeviationKind> {
    DEVIATION_KINDS.iter().find(|(k, _)| body.contains(k)).map(|(_, kind)| *kind)
}

/// Physical quantity a track-content deviation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Mode of flight (longitudinal, transversal, vertical).
    Mof,
    /// Rate of climb/descent.
    Rocd,
    /// Track mode C.
    Tmc,
    Position,
    Velocity,
    /// WGS-84 latitude/longitude.
    Wgs,
    Acceleration,
    BaroAltitude,
    GeomAltitude,
    Heading,
    Status,
    Mode3A,
    Mode2,
}

impl ContentKind {
    /// Short label used in the view point `type` and `name`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            ContentKind::Mof => "MOF",
            ContentKind::Rocd => "ROCD",
            ContentKind::Tmc => "TMC",
            ContentKind::Position => "POS",
            ContentKind::Velocity => "VEL",
            ContentKind::Wgs => "WGS",
            ContentKind::Acceleration => "ACC",
            ContentKind::BaroAltitude => "BH",
            ContentKind::GeomAltitude => "GH",
            ContentKind::Heading => "HDG",
            ContentKind::Status => "STA",
            ContentKind::Mode3A => "M3A",
            ContentKind::Mode2 => "M2",
        }
    }

    /// Database object and variables worth showing alongside the deviation.
    pub fn context_variables(self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            ContentKind::Mof => Some(("Tracker", &["mof_long", "mof_trans", "mof_vert"])),
            ContentKind::Rocd => Some(("Tracker", &["calc_vertical_rate_ftm"])),
            ContentKind::Tmc => Some(("Tracker", &["modec_code_ft"])),
            ContentKind::Velocity => Some(("Tracker", &["groundspeed_kt"])),
            ContentKind::Wgs => Some(("Meta", &["pos_lat_deg", "pos_long_deg"])),
            ContentKind::Acceleration => Some(("Meta", &["accel_ax_ms2", "accel_ay_ms2"])),
            ContentKind::BaroAltitude => Some(("Meta", &["alt_baro_ft"])),
            ContentKind::GeomAltitude => Some(("Meta", &["alt_geo_ft"])),
            ContentKind::Heading => Some(("Meta", &["heading_deg"])),
            ContentKind::Mode3A => Some(("Tracker", &["mode3a_code"])),
            ContentKind::Mode2 => Some(("Tracker", &["mode2_code"])),
            ContentKind::Position | ContentKind::Status => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FieldKey {
    Exact(&'static str),
    Prefix(&'static str),
}

impl FieldKey {
    fn matches(self, field: &str) -> bool {
        match self {
            FieldKey::Exact(key) => field == key,
            FieldKey::Prefix(prefix) => field.starts_with(prefix),
        }
    }
}

/// Field names of `reported K=...` clauses.
const REPORTED_FIELDS: &[(FieldKey, ContentKind)] = &[
    (FieldKey::Exact("mof_longi"), ContentKind::Mof),
    (FieldKey::Exact("mof_trans"), ContentKind::Mof),
    (FieldKey::Exact("mof_verti"), ContentKind::Mof),
    (FieldKey::Exact("rocd"), ContentKind::Rocd),
    (FieldKey::Exact("tmc"), ContentKind::Tmc),
    (FieldKey::Exact("x_position"), ContentKind::Position),
    (FieldKey::Exact("y_position"), ContentKind::Position),
    (FieldKey::Exact("x_velocity"), ContentKind::Velocity),
    (FieldKey::Exact("y_velocity"), ContentKind::Velocity),
    (FieldKey::Exact("longitude"), ContentKind::Wgs),
    (FieldKey::Exact("latitude"), ContentKind::Wgs),
    (FieldKey::Exact("x_acceleration"), ContentKind::Acceleration),
    (FieldKey::Exact("y_acceleration"), ContentKind::Acceleration),
    (FieldKey::Exact("baro_altitude"), ContentKind::BaroAltitude),
    (FieldKey::Exact("geom_altitude"), ContentKind::GeomAltitude),
    (FieldKey::Exact("heading"), ContentKind::Heading),
    (FieldKey::Prefix("status."), ContentKind::Status),
];

pub(crate) fn reported_kind(field: &str) -> Option<ContentKind> {
    REPORTED_FIELDS.iter().find(|(key, _)| key.matches(field)).map(|(_, kind)| *kind)
}

/// Leading text of `unexpected ...` clauses, checked in order.
const UNEXPECTED_VALUES: &[(&str, ContentKind)] =
    &[("SSR mode 3/A code", ContentKind::Mode3A), ("SSR mode 2 code", ContentKind::Mode2)];

pub(crate) fn unexpected_kind(payload: &str) -> Option<ContentKind> {
    UNEXPECTED_VALUES.iter().find(|(prefix, _)| payload.starts_with(prefix)).map(|(_, kind)| *kind)
}
