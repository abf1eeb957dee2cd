use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, TextInput, TextInputProps,
    TextInputStyle, centered_rect,
};

use super::Component;
use crate::action::Action;

const PLACEHOLDER: &str = "street number, street, postcode, city, country";

/// Modal used to edit the address binding
pub struct AddressEditor {
    input: TextInput,
    modal: Modal,
    was_open: bool,
}

pub struct AddressEditorProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
}

impl Default for AddressEditor {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl AddressEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
        }
        self.was_open = is_open;
    }
}

impl Component<Action> for AddressEditor {
    type Props<'a> = AddressEditorProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::EditorClose],
            KeyCode::Enter => return vec![Action::EditorSubmit(props.query.to_string())],
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::all(1),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: Action::EditorQueryChange,
            on_submit: Action::EditorSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 20 || area.height < 7 {
            return;
        }

        let AddressEditor { input, modal, .. } = self;
        let modal_area = centered_rect(70, 7, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Label
                Constraint::Length(3), // Input
                Constraint::Min(0),
            ])
            .split(content_area);

            let label = Line::from(vec![
                Span::styled(" Address ", Style::default().fg(Color::Cyan)),
                Span::styled("Enter to apply, Esc to cancel", Style::default().fg(Color::DarkGray)),
            ]);
            frame.render_widget(Paragraph::new(label), chunks[0]);

            let input_props = TextInputProps {
                value: props.query,
                placeholder: PLACEHOLDER,
                is_focused: props.is_focused,
                style: TextInputStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::all(1),
                        bg: Some(Color::Rgb(50, 50, 60)),
                        fg: None,
                    },
                    placeholder_style: None,
                    cursor_style: None,
                },
                on_change: Action::EditorQueryChange,
                on_submit: Action::EditorSubmit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[1], input_props);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::EditorClose,
                render_content: &mut render_content,
            },
        );
    }
}
