use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{AddressMap, AddressMapProps, Component, NurseCard, NurseCardProps};
use crate::action::Action;
use crate::state::AppState;

/// Width of the nurse card column when a record is loaded.
pub const CARD_WIDTH: u16 = 34;

/// Props for Dashboard - read-only view of state
pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Nurse card next to the address map, with the help bar
#[derive(Default)]
pub struct Dashboard {
    map: AddressMap,
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return vec![Action::Quit];
            }
        }

        self.map
            .handle_event(
                event,
                AddressMapProps {
                    state: props.state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let state = props.state;
        let map_area = if state.nurse.is_some() {
            let columns =
                Layout::horizontal([Constraint::Length(CARD_WIDTH), Constraint::Min(20)])
                    .split(chunks[0]);
            let messages = state.locale.messages();
            let mut card = NurseCard;
            card.render(
                frame,
                columns[0],
                NurseCardProps {
                    record: state.nurse.as_ref(),
                    title: messages.nurse_title,
                    placeholder: messages.no_record,
                },
            );
            columns[1]
        } else {
            chunks[0]
        };

        self.map.render(
            frame,
            map_area,
            AddressMapProps {
                state,
                is_focused: props.is_focused && !state.editor_open,
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("r", "refresh"),
                    StatusBarHint::new("e", "edit address"),
                    StatusBarHint::new("+/-", "zoom"),
                    StatusBarHint::new("hjkl", "pan"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NurseRecord;
    use tui_dispatch::testing::*;

    #[test]
    fn test_handle_event_quit() {
        let mut component = Dashboard::default();
        let state = AppState::default();
        let props = DashboardProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("q")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_handle_event_forwards_to_map() {
        let mut component = Dashboard::default();
        let state = AppState::default();
        let props = DashboardProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("j")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
    }

    #[test]
    fn test_render_with_nurse_card() {
        let mut render = RenderHarness::new(100, 30);
        let mut component = Dashboard::default();
        let state = AppState::new("3 rue Haute", Default::default()).with_nurse(Some(NurseRecord {
            first_name: Some("Claire".into()),
            last_name: Some("Martin".into()),
            ..Default::default()
        }));

        let output = render.render_to_string_plain(|frame| {
            let props = DashboardProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Claire Martin"));
        assert!(output.contains("quit"), "help bar missing:\n{output}");
    }
}
