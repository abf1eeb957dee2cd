//! Application state - single source of truth

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::messages::Locale;

/// Zoom used by `setView` when the caller does not pick one.
pub const DEFAULT_ZOOM: u8 = 15;
/// Zoom the map is constructed with, before any address is resolved.
pub const INITIAL_ZOOM: u8 = 2;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;

pub const DEFAULT_MAP_HEIGHT: &str = "300px";

/// A latitude/longitude pair in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPosition {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One geocoding result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Place {
    #[serde(deserialize_with = "coordinate")]
    pub lat: f64,
    #[serde(deserialize_with = "coordinate")]
    pub lon: f64,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Place {
    pub fn position(&self) -> GeoPosition {
        GeoPosition::new(self.lat, self.lon)
    }
}

/// Nominatim sends coordinates as strings, other services as numbers.
fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate: {text:?}"))),
    }
}

/// Unique identifier of a map instance
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct MapId(pub String);

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(1);

impl MapId {
    pub fn generate() -> Self {
        let n = NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("address-map-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which message the map currently shows under it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum NoticeKind {
    ServerError,
    NotFound,
    InvalidAddress,
    #[default]
    Reset,
}

impl NoticeKind {
    pub fn is_error(self) -> bool {
        !matches!(self, NoticeKind::Reset)
    }

    /// Errors drop the resolved position; a reset keeps it.
    pub fn clears_position(self) -> bool {
        self.is_error()
    }
}

/// Popup bound to the marker
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Popup {
    pub html: String,
    pub open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PanDirection {
    North,
    South,
    East,
    West,
}

/// Everything the map widget needs to draw itself
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MapViewState {
    pub map_id: MapId,
    pub initialized: bool,
    pub center: GeoPosition,
    pub zoom: u8,
    /// Only meaningful while `initialized` and `error_message` is empty.
    pub marker_position: GeoPosition,
    pub popup: Option<Popup>,
    pub notice: NoticeKind,
    pub error_message: String,
    pub action_label: String,
}

impl MapViewState {
    pub fn new(locale: Locale) -> Self {
        Self {
            map_id: MapId::generate(),
            initialized: false,
            center: GeoPosition::default(),
            zoom: INITIAL_ZOOM,
            marker_position: GeoPosition::default(),
            popup: None,
            notice: NoticeKind::Reset,
            error_message: String::new(),
            action_label: locale.messages().recenter.to_string(),
        }
    }

    pub fn marker_visible(&self) -> bool {
        self.initialized && self.error_message.is_empty()
    }
}

impl Default for MapViewState {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

/// CSS-style length for the map height, resolved to terminal rows when drawn
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MapHeight(pub String);

/// Pixels represented by one terminal row.
pub const PX_PER_ROW: f32 = 16.0;

impl MapHeight {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Rows to use given the height available to the component.
    pub fn rows(&self, available: u16) -> u16 {
        let rows = parse_length(&self.0, available).unwrap_or_else(|| {
            tracing::warn!(value = %self.0, "unparseable map height, using default");
            parse_length(DEFAULT_MAP_HEIGHT, available).unwrap_or(available)
        });
        rows.min(available)
    }
}

impl Default for MapHeight {
    fn default() -> Self {
        Self(DEFAULT_MAP_HEIGHT.to_string())
    }
}

fn parse_length(value: &str, available: u16) -> Option<u16> {
    let value = value.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f32 = number.parse().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }

    let rows = match unit.trim() {
        "" => number,
        "px" => number / PX_PER_ROW,
        "em" | "rem" => number,
        "%" | "vh" => f32::from(available) * number / 100.0,
        _ => return None,
    };
    Some(rows.ceil().min(f32::from(u16::MAX)) as u16)
}

/// A nurse record as the host application stores it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NurseRecord {
    pub id: Option<String>,
    #[serde(alias = "firstName", alias = "firstname")]
    pub first_name: Option<String>,
    #[serde(alias = "lastName", alias = "lastname")]
    pub last_name: Option<String>,
    pub service: Option<String>,
    #[serde(alias = "phoneNumber")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "adress")]
    pub address: Option<String>,
    /// Fields the card does not display, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl NurseRecord {
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Bindings ---
    #[debug(section = "Address", label = "Text")]
    pub address: String,

    #[debug(section = "Address", label = "Height", debug_fmt)]
    pub map_height: MapHeight,

    // --- Resolution ---
    #[debug(section = "Address", label = "Position", debug_fmt)]
    pub address_position: Option<GeoPosition>,

    /// Sequence number of the latest issued lookup
    #[debug(section = "Geocoding", label = "Request")]
    pub request_seq: u64,

    #[debug(section = "Geocoding", label = "Resolving")]
    pub is_resolving: bool,

    #[debug(section = "Map", label = "View", debug_fmt)]
    pub map: MapViewState,

    #[debug(section = "Map", label = "Locale", debug_fmt)]
    pub locale: Locale,

    // --- Record card ---
    #[debug(section = "Nurse", label = "Record", debug_fmt)]
    pub nurse: Option<NurseRecord>,

    // --- Address editor (skipped) ---
    #[debug(skip)]
    pub editor_open: bool,

    #[debug(skip)]
    pub editor_query: String,
}

impl AppState {
    pub fn new(address: impl Into<String>, locale: Locale) -> Self {
        Self {
            address: address.into(),
            map_height: MapHeight::default(),
            address_position: None,
            request_seq: 0,
            is_resolving: false,
            map: MapViewState::new(locale),
            locale,
            nurse: None,
            editor_open: false,
            editor_query: String::new(),
        }
    }

    pub fn with_nurse(mut self, nurse: Option<NurseRecord>) -> Self {
        self.nurse = nurse;
        self
    }

    pub fn with_map_height(mut self, height: MapHeight) -> Self {
        self.map_height = height;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(String::new(), Locale::default())
    }
}
