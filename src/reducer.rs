//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::geo;
use crate::state::{
    AppState, DEFAULT_ZOOM, GeoPosition, INITIAL_ZOOM, MapHeight, NoticeKind, Place, Popup,
};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Address actions =====
        Action::AddressChange(address) => change_address(state, address),

        Action::AddressResolve => resolve_address(state),

        // ===== Map actions =====
        Action::MapMounted => {
            if state.map.initialized {
                return DispatchResult::unchanged();
            }
            state.map.initialized = true;
            state.map.center = GeoPosition::default();
            state.map.marker_position = GeoPosition::default();
            state.map.zoom = INITIAL_ZOOM;
            state.map.popup = None;
            resolve_address(state)
        }

        Action::MapUnmounted => {
            if !state.map.initialized {
                return DispatchResult::unchanged();
            }
            state.map.initialized = false;
            state.map.popup = None;
            state.is_resolving = false;
            // Any response still in flight belongs to the torn-down map.
            state.request_seq += 1;
            DispatchResult::changed()
        }

        Action::MapSetView {
            lat,
            lon,
            zoom,
            popup,
        } => {
            if !state.map.initialized {
                return DispatchResult::unchanged();
            }
            set_view(state, lat, lon, zoom.unwrap_or(DEFAULT_ZOOM), popup);
            DispatchResult::changed()
        }

        Action::MapHeightChange(height) => {
            let height = MapHeight::new(height);
            if state.map_height == height {
                return DispatchResult::unchanged();
            }
            state.map_height = height;
            DispatchResult::changed()
        }

        Action::MapActionPress => {
            if !state.map.initialized {
                return DispatchResult::unchanged();
            }
            if state.map.notice.is_error() {
                return resolve_address(state);
            }
            match state.address_position {
                Some(position) => {
                    set_view(state, position.lat, position.lon, DEFAULT_ZOOM, None);
                    DispatchResult::changed()
                }
                None => resolve_address(state),
            }
        }

        Action::MapZoomIn => zoom_by(state, 1),

        Action::MapZoomOut => zoom_by(state, -1),

        Action::MapPan(direction) => {
            if !state.map.initialized {
                return DispatchResult::unchanged();
            }
            state.map.center = geo::pan(state.map.center, state.map.zoom, direction);
            DispatchResult::changed()
        }

        // ===== Geocode results =====
        Action::GeocodeDidLoad { seq, places } => {
            if !accepts(state, seq) {
                return DispatchResult::unchanged();
            }
            state.is_resolving = false;
            apply_places(state, places);
            DispatchResult::changed()
        }

        Action::GeocodeDidError { seq, message } => {
            if !accepts(state, seq) {
                return DispatchResult::unchanged();
            }
            tracing::debug!(seq, %message, "showing server error notice");
            state.is_resolving = false;
            show_notice(state, NoticeKind::ServerError);
            DispatchResult::changed()
        }

        // ===== Editor actions =====
        Action::EditorOpen => {
            state.editor_open = true;
            state.editor_query = state.address.clone();
            DispatchResult::changed()
        }

        Action::EditorClose => {
            state.editor_open = false;
            state.editor_query.clear();
            DispatchResult::changed()
        }

        Action::EditorQueryChange(query) => {
            state.editor_query = query;
            DispatchResult::changed()
        }

        Action::EditorSubmit(address) => {
            state.editor_open = false;
            state.editor_query.clear();
            let result = change_address(state, address);
            if result.changed {
                result
            } else {
                DispatchResult::changed()
            }
        }

        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn change_address(state: &mut AppState, address: String) -> DispatchResult<Effect> {
    if state.address == address {
        return DispatchResult::unchanged();
    }
    state.address = address;
    if !state.map.initialized {
        return DispatchResult::changed();
    }
    resolve_address(state)
}

fn resolve_address(state: &mut AppState) -> DispatchResult<Effect> {
    if !state.map.initialized {
        return DispatchResult::unchanged();
    }

    // A newer request supersedes whatever is in flight, even a failed one.
    state.request_seq += 1;

    if state.address.trim().is_empty() {
        state.is_resolving = false;
        show_notice(state, NoticeKind::InvalidAddress);
        return DispatchResult::changed();
    }

    state.is_resolving = true;
    DispatchResult::changed_with(Effect::Geocode {
        seq: state.request_seq,
        query: state.address.clone(),
    })
}

fn accepts(state: &AppState, seq: u64) -> bool {
    let current = state.map.initialized && seq == state.request_seq;
    if !current {
        tracing::debug!(seq, latest = state.request_seq, "dropping stale geocoding response");
    }
    current
}

fn apply_places(state: &mut AppState, places: Vec<Place>) {
    let Some(first) = places.into_iter().next() else {
        show_notice(state, NoticeKind::NotFound);
        return;
    };

    show_notice(state, NoticeKind::Reset);
    let position = first.position();
    state.address_position = Some(position);
    set_view(state, position.lat, position.lon, DEFAULT_ZOOM, None);
}

/// Recenter the map and move the marker, opening `popup` when given.
fn set_view(state: &mut AppState, lat: f64, lon: f64, zoom: u8, popup: Option<String>) {
    let position = GeoPosition::new(lat, lon);
    state.map.center = position;
    state.map.zoom = geo::clamp_zoom(i16::from(zoom));
    state.map.marker_position = position;
    if let Some(html) = popup {
        state.map.popup = Some(Popup { html, open: true });
    }
}

/// Pure transition of the notice shown under the map
fn show_notice(state: &mut AppState, kind: NoticeKind) {
    let messages = state.locale.messages();
    state.map.notice = kind;
    state.map.error_message = match kind {
        NoticeKind::ServerError => messages.server_error.to_string(),
        NoticeKind::NotFound => state.locale.not_found(&state.address),
        NoticeKind::InvalidAddress => messages.invalid_address.to_string(),
        NoticeKind::Reset => String::new(),
    };
    state.map.action_label = if kind.is_error() {
        messages.refresh.to_string()
    } else {
        messages.recenter.to_string()
    };
    if kind.clears_position() {
        state.address_position = None;
        state.map.popup = None;
    }
}

fn zoom_by(state: &mut AppState, delta: i16) -> DispatchResult<Effect> {
    if !state.map.initialized {
        return DispatchResult::unchanged();
    }
    let zoom = geo::clamp_zoom(i16::from(state.map.zoom) + delta);
    if zoom == state.map.zoom {
        return DispatchResult::unchanged();
    }
    state.map.zoom = zoom;
    DispatchResult::changed()
}
