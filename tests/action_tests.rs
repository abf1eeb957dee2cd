//! Store and component key tests using EffectStore and TestHarness

use careview::{
    action::Action,
    components::{AddressMap, AddressMapProps, Component},
    effect::Effect,
    messages::Locale,
    reducer::reducer,
    state::{AppState, NoticeKind, PanDirection, Place},
};
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};

const RIVOLI: &str = "10 rue de Rivoli, 75001, Paris, France";

fn rivoli() -> Place {
    Place {
        lat: 48.8606,
        lon: 2.3376,
        display_name: Some("Rue de Rivoli, Paris".into()),
    }
}

fn mounted_store() -> EffectStore<AppState, Action, Effect> {
    let mut store = EffectStore::new(AppState::new(RIVOLI, Locale::En), reducer);
    store.dispatch(Action::MapMounted);
    store
}

#[test]
fn test_mount_requests_geocoding() {
    let mut store = EffectStore::new(AppState::new(RIVOLI, Locale::En), reducer);
    assert!(!store.state().map.initialized);

    let result = store.dispatch(Action::MapMounted);
    assert!(result.changed);
    assert!(store.state().map.initialized);
    assert!(store.state().is_resolving);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        &result.effects[0],
        Effect::Geocode { seq: 1, query } if query == RIVOLI
    ));
}

#[test]
fn test_found_address_moves_map_and_marker() {
    let mut store = mounted_store();

    store.dispatch(Action::GeocodeDidLoad {
        seq: 1,
        places: vec![rivoli()],
    });

    let state = store.state();
    assert!(!state.is_resolving);
    assert_eq!(state.map.notice, NoticeKind::Reset);
    assert_eq!(state.map.center.lat, 48.8606);
    assert_eq!(state.map.marker_position.lon, 2.3376);
    assert_eq!(state.map.zoom, 15);
    assert_eq!(state.map.action_label, "Recenter map");
    assert!(state.map.marker_visible());
}

#[test]
fn test_recenter_after_pan() {
    let mut store = mounted_store();
    store.dispatch(Action::GeocodeDidLoad {
        seq: 1,
        places: vec![rivoli()],
    });
    store.dispatch(Action::MapPan(PanDirection::East));
    store.dispatch(Action::MapZoomOut);
    assert_ne!(store.state().map.center.lon, 2.3376);

    let result = store.dispatch(Action::MapActionPress);
    assert!(result.changed);
    assert!(result.effects.is_empty(), "Recenter must not geocode again");
    assert_eq!(store.state().map.center.lon, 2.3376);
    assert_eq!(store.state().map.zoom, 15);
}

#[test]
fn test_refresh_after_server_error() {
    let mut store = mounted_store();
    store.dispatch(Action::GeocodeDidError {
        seq: 1,
        message: "HTTP 503".into(),
    });
    assert_eq!(store.state().map.action_label, "Refresh");

    let result = store.dispatch(Action::MapActionPress);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(result.effects[0], Effect::Geocode { seq: 2, .. }));
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::new(AppState::new(RIVOLI, Locale::En));
    let mut component = AddressMap::default();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r = l e", |state, event| {
        let props = AddressMapProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(4);
    actions.assert_first(Action::MapActionPress);
    assert_emitted!(actions, Action::MapZoomIn);
    assert_emitted!(actions, Action::MapPan(PanDirection::East));
    assert_emitted!(actions, Action::EditorOpen);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = AddressMap::default();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r = h e", |state, event| {
        let props = AddressMapProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::GeocodeDidLoad {
        seq: 1,
        places: Vec::new(),
    };
    let mounted = Action::MapMounted;
    let height = Action::MapHeightChange("12em".into());
    let resolve = Action::AddressResolve;
    let submit = Action::EditorSubmit("1 Main St".into());
    let render = Action::Render;

    assert_eq!(did_load.category(), Some("geocode_did"));
    assert_eq!(mounted.category(), Some("map"));
    assert_eq!(height.category(), Some("map"));
    assert_eq!(Action::MapActionPress.category(), Some("map"));
    assert_eq!(Action::MapPan(PanDirection::West).category(), Some("map"));
    assert_eq!(resolve.category(), Some("address"));
    assert_eq!(submit.category(), Some("editor"));
    assert_eq!(render.category(), None);

    assert!(did_load.is_geocode_did());
    assert!(mounted.is_map());
    assert!(height.is_map());
    assert!(resolve.is_address());
}

#[test]
fn test_result_actions_macro() {
    let actions = vec![
        Action::AddressResolve,
        Action::GeocodeDidError {
            seq: 3,
            message: "timeout".into(),
        },
    ];

    assert_emitted!(actions, Action::AddressResolve);
    assert_emitted!(actions, Action::GeocodeDidError { .. });
    assert_not_emitted!(actions, Action::GeocodeDidLoad { .. });
    assert_not_emitted!(actions, Action::Quit);
}
