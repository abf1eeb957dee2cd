//! Full-screen render checks using RenderHarness

use careview::{
    action::Action,
    components::{AddressEditor, AddressEditorProps, Component, Dashboard, DashboardProps},
    messages::Locale,
    reducer::reducer,
    state::{AppState, MapHeight, NurseRecord, Place},
};
use tui_dispatch::testing::*;

fn nurse() -> NurseRecord {
    NurseRecord {
        first_name: Some("Claire".into()),
        last_name: Some("Martin".into()),
        service: Some("Soins à domicile".into()),
        phone: Some("01 23 45 67 89".into()),
        address: Some("10 rue de Rivoli, Paris".into()),
        ..Default::default()
    }
}

fn resolved(locale: Locale) -> AppState {
    let mut state = AppState::new("10 rue de Rivoli, Paris", locale).with_nurse(Some(nurse()));
    reducer(&mut state, Action::MapMounted);
    reducer(
        &mut state,
        Action::GeocodeDidLoad {
            seq: 1,
            places: vec![Place {
                lat: 48.8606,
                lon: 2.3376,
                display_name: None,
            }],
        },
    );
    state
}

fn render_dashboard(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut component = Dashboard::default();
    render.render_to_string_plain(|frame| {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_dashboard_with_nurse() {
    let output = render_dashboard(&resolved(Locale::En), 100, 30);

    assert!(output.contains("Nurse"), "card title missing:\n{output}");
    assert!(output.contains("Claire Martin"));
    assert!(output.contains("Recenter map"));
    assert!(output.contains("48.8606, 2.3376"));
    assert!(output.contains("OpenStreetMap"), "attribution missing:\n{output}");
    assert!(output.contains("quit"));
}

#[test]
fn test_render_dashboard_in_french() {
    let output = render_dashboard(&resolved(Locale::Fr), 100, 30);

    assert!(output.contains("Infirmière"));
    assert!(output.contains("Recentrer la carte"));
}

#[test]
fn test_render_without_nurse_uses_full_width() {
    let mut state = AppState::new("Paris", Locale::En);
    reducer(&mut state, Action::MapMounted);

    let output = render_dashboard(&state, 80, 24);
    assert!(!output.contains("Nurse"));
    assert!(output.contains("Paris"));
}

#[test]
fn test_render_small_map_height() {
    let state = resolved(Locale::En).with_map_height(MapHeight::new("5"));
    let output = render_dashboard(&state, 100, 30);

    // Map box, notice and button all fit in the upper part of the screen.
    let button_row = output
        .lines()
        .position(|line| line.contains("Recenter map"))
        .unwrap_or(usize::MAX);
    assert!(button_row < 10, "button should sit under a short map:\n{output}");
}

#[test]
fn test_render_editor_overlay() {
    let mut state = resolved(Locale::En);
    reducer(&mut state, Action::EditorOpen);

    let mut render = RenderHarness::new(100, 30);
    let mut dashboard = Dashboard::default();
    let mut editor = AddressEditor::new();
    editor.set_open(true);

    let output = render.render_to_string_plain(|frame| {
        let area = frame.area();
        dashboard.render(
            frame,
            area,
            DashboardProps {
                state: &state,
                is_focused: false,
            },
        );
        editor.render(
            frame,
            area,
            AddressEditorProps {
                query: &state.editor_query,
                is_focused: true,
            },
        );
    });

    assert!(output.contains("Enter to apply"), "editor missing:\n{output}");
    assert!(output.contains("10 rue de Rivoli, Paris"));
}

#[test]
fn test_render_follows_height_binding() {
    fn button_row(output: &str) -> usize {
        output
            .lines()
            .position(|line| line.contains("Recenter map"))
            .unwrap_or(usize::MAX)
    }

    let mut state = resolved(Locale::En);
    reducer(&mut state, Action::MapHeightChange("5".into()));
    let short = render_dashboard(&state, 100, 30);

    reducer(&mut state, Action::MapHeightChange("160px".into()));
    let tall = render_dashboard(&state, 100, 30);

    // 5 rows of map, then the two notice rows.
    assert_eq!(button_row(&short), 7, "short map:\n{short}");
    // 160px is 10 rows.
    assert_eq!(button_row(&tall), 12, "tall map:\n{tall}");
}
