use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::EventKind;

use super::{Component, MapCanvas, MapCanvasProps};
use crate::action::Action;
use crate::state::{AppState, PanDirection};

/// Rows under the map: two for the notice, one for the action button.
pub const FOOTER_ROWS: u16 = 3;

/// Address rendered on a map, with its notice and action button
#[derive(Default)]
pub struct AddressMap;

pub struct AddressMapProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl Component<Action> for AddressMap {
    type Props<'a> = AddressMapProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Char('r') | KeyCode::Enter | KeyCode::F(5) => Some(Action::MapActionPress),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::MapZoomIn),
            KeyCode::Char('-') => Some(Action::MapZoomOut),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MapPan(PanDirection::North)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MapPan(PanDirection::South)),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::MapPan(PanDirection::West)),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::MapPan(PanDirection::East)),
            KeyCode::Char('e') | KeyCode::Char('/') => Some(Action::EditorOpen),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let map_rows = state
            .map_height
            .rows(area.height.saturating_sub(FOOTER_ROWS))
            .max(3);
        let chunks = Layout::vertical([
            Constraint::Length(map_rows),
            Constraint::Length(2), // Notice
            Constraint::Length(1), // Action button + coordinates
            Constraint::Min(0),
        ])
        .split(area);

        let mut canvas = MapCanvas;
        canvas.render(
            frame,
            chunks[0],
            MapCanvasProps {
                map: &state.map,
                title: &state.address,
                is_focused: props.is_focused,
            },
        );

        render_notice(frame, chunks[1], state);
        render_footer(frame, chunks[2], state, props.is_focused);
    }
}

fn render_notice(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if !state.map.error_message.is_empty() {
        Line::from(Span::styled(
            state.map.error_message.clone(),
            Style::default().fg(Color::Rgb(220, 100, 100)),
        ))
    } else if state.is_resolving {
        Line::from(Span::styled(
            state.locale.messages().resolving,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, is_focused: bool) {
    let button_style = if is_focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", state.map.action_label),
        button_style,
    )];
    if let Some(position) = state.address_position.filter(|_| state.map.marker_visible()) {
        spans.push(Span::styled(
            format!("  {:.4}, {:.4}", position.lat, position.lon),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled(
        format!("  z{}", state.map.zoom),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
