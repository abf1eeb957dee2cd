//! Actions: host bindings, map interactions and async geocoding results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{PanDirection, Place};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Address category (host bindings) =====
    /// Address binding changed; re-resolves when the value differs
    #[action(category = "address")]
    AddressChange(String),

    /// Intent: resolve the current address (triggers async task)
    #[action(category = "address")]
    AddressResolve,

    // ===== Map category =====
    /// Lifecycle: the host has attached the map's mount point
    #[action(category = "map")]
    MapMounted,

    /// Lifecycle: the map is being torn down
    #[action(category = "map")]
    MapUnmounted,

    /// Recenter the map and move the marker, optionally opening a popup
    #[action(category = "map")]
    MapSetView {
        lat: f64,
        lon: f64,
        zoom: Option<u8>,
        popup: Option<String>,
    },

    /// Height binding changed (CSS length)
    #[action(category = "map")]
    MapHeightChange(String),

    /// The button under the map: refresh on error, recenter otherwise
    #[action(category = "map")]
    MapActionPress,

    #[action(category = "map")]
    MapZoomIn,

    #[action(category = "map")]
    MapZoomOut,

    #[action(category = "map")]
    MapPan(PanDirection),

    // ===== Geocode results (inferred geocode_did category) =====
    /// Result: lookup `seq` answered with these places (possibly none)
    GeocodeDidLoad { seq: u64, places: Vec<Place> },

    /// Result: lookup `seq` failed in transport or on the server
    GeocodeDidError { seq: u64, message: String },

    // ===== Editor category =====
    #[action(category = "editor")]
    EditorOpen,

    #[action(category = "editor")]
    EditorClose,

    #[action(category = "editor")]
    EditorQueryChange(String),

    /// Submit the edited address as the new binding value
    #[action(category = "editor")]
    EditorSubmit(String),

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Exit the application
    Quit,
}
