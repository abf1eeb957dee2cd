use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;
use crate::state::NurseRecord;

/// Compact summary card for a nurse record
pub struct NurseCard;

pub struct NurseCardProps<'a> {
    pub record: Option<&'a NurseRecord>,
    pub title: &'a str,
    pub placeholder: &'a str,
}

impl Component<Action> for NurseCard {
    type Props<'a> = NurseCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", props.title));

        let Some(record) = props.record else {
            let line = Line::from(Span::styled(
                props.placeholder.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(Paragraph::new(line).block(block), area);
            return;
        };

        let dim = Style::default().fg(Color::Gray);
        let mut lines = vec![Line::from(
            record
                .full_name()
                .unwrap_or_else(|| props.placeholder.to_string())
                .bold(),
        )];
        if let Some(service) = &record.service {
            lines.push(Line::from(Span::styled(service.clone(), dim.italic())));
        }
        lines.push(Line::default());
        for (icon, value) in [
            ("☎", &record.phone),
            ("✉", &record.email),
            ("⌂", &record.address),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                lines.push(Line::from(vec![
                    Span::styled(format!("{icon} "), Style::default().fg(Color::Cyan)),
                    Span::styled(value.to_string(), dim),
                ]));
            }
        }

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}
