//! Connection form rendering.

use crate::tui::ui::theme;
use crate::tui::{ConnectionField, Session};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const LABEL_WIDTH: usize = 10;

impl Session {
    pub(crate) fn render_connection_form(&self, frame: &mut Frame, full_area: Rect) {
        let form = &self.form;
        let width = full_area.width.clamp(44, 72);
        let height = if form.error.is_some() || self.is_connecting() { 13 } else { 10 };
        let area = Self::centered_rect(width, height, full_area);

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::primary()))
            .title(" Connection ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let selected_label = Style::default().fg(theme::highlight()).add_modifier(Modifier::BOLD);
        let normal_label = Style::default().fg(theme::muted());
        let selected_value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let normal_value = Style::default().fg(Color::White);

        let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 1);
        let mut lines: Vec<Line> = ConnectionField::ALL
            .iter()
            .map(|&field| {
                let focused = field == form.selected;
                let mut value = form.display_value(field);
                if focused {
                    value.push('_');
                }
                let value = if field == ConnectionField::User && value.is_empty() {
                    "(default)".to_string()
                } else {
                    theme::truncate_to_display_width(&value, value_width)
                };
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH),
                        if focused { selected_label } else { normal_label },
                    ),
                    Span::styled(value, if focused { selected_value } else { normal_value }),
                ])
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("[ Enter ] Connect", Style::default().fg(theme::success()).add_modifier(Modifier::BOLD))));

        if let Some(fetch) = &self.pending_fetch {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Connecting to {}… (Esc to cancel)", fetch.connection().label()),
                Style::default().fg(theme::highlight()),
            )));
        } else if let Some(error) = &form.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(theme::failure()))));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
