//! Global status bar rendering.

use crate::tui::ui::theme::{self, display_width};
use crate::tui::{Screen, Session};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusContext {
    Connection,
    Menu,
    Targets,
    TargetSearch,
    BatchRunning,
    BatchReport,
}

fn key_hints(hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (idx, (key, action)) in hints.iter().enumerate() {
        let separator = if idx + 1 == hints.len() { "" } else { " | " };
        spans.push(Span::styled(*key, Style::default().fg(theme::primary())));
        spans.push(Span::styled(format!(":{}{}", action, separator), Style::default().fg(theme::muted())));
    }
    spans
}

impl Session {
    pub(crate) fn render_global_status_bar(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (left_spans, right_spans) = self.build_status_line_sections();
        let base_style = Style::default().fg(Color::Gray);

        if right_spans.is_empty() {
            frame.render_widget(Paragraph::new(Line::from(left_spans)).style(base_style), area);
            return;
        }

        let right_width = spans_display_width(&right_spans).min(area.width as usize) as u16;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(right_width)])
            .split(area);

        let left = Paragraph::new(Line::from(left_spans)).style(base_style);
        let right = Paragraph::new(Line::from(right_spans)).style(base_style).alignment(Alignment::Right);
        frame.render_widget(left, chunks[0]);
        frame.render_widget(right, chunks[1]);
    }

    pub(crate) fn resolve_status_context(&self) -> StatusContext {
        match &self.screen {
            Screen::ConnectionSetup => StatusContext::Connection,
            Screen::Menu { .. } => StatusContext::Menu,
            Screen::TargetSelection { search_mode: true, .. } => StatusContext::TargetSearch,
            Screen::TargetSelection { .. } => StatusContext::Targets,
            Screen::BatchExecution(run) if run.is_complete() => StatusContext::BatchReport,
            Screen::BatchExecution(_) => StatusContext::BatchRunning,
        }
    }

    fn build_status_line_sections(&self) -> (Vec<Span<'static>>, Vec<Span<'static>>) {
        let context = self.resolve_status_context();
        let (label, label_color) = match context {
            StatusContext::Connection => ("Connection", theme::primary()),
            StatusContext::Menu => ("Menu", theme::primary()),
            StatusContext::Targets => ("Databases", theme::primary()),
            StatusContext::TargetSearch => ("Search", theme::highlight()),
            StatusContext::BatchRunning => ("Backup", theme::highlight()),
            StatusContext::BatchReport => ("Report", theme::success()),
        };

        let mut left = vec![Span::styled(label, Style::default().fg(label_color).add_modifier(Modifier::BOLD))];
        if let Some(connection) = &self.connection {
            left.push(Span::styled(" || ", Style::default().fg(theme::muted())));
            left.push(Span::styled(connection.label(), Style::default().fg(Color::White)));
        }

        let right = match context {
            StatusContext::Connection if self.is_connecting() => key_hints(&[("Esc", "cancel"), ("^C", "quit")]),
            StatusContext::Connection if self.connection.is_some() => {
                key_hints(&[("Tab", "field"), ("^U", "clear"), ("Enter", "connect"), ("Esc", "menu"), ("^C", "quit")])
            }
            StatusContext::Connection => key_hints(&[("Tab", "field"), ("^U", "clear"), ("Enter", "connect"), ("^C", "quit")]),
            StatusContext::Menu => key_hints(&[("↑/↓", "move"), ("Enter", "select"), ("q", "quit")]),
            StatusContext::Targets => key_hints(&[
                ("↑/↓", "move"),
                ("←/→", "page"),
                ("Space", "toggle"),
                ("/", "search"),
                ("Enter", "backup"),
                ("Esc", "menu"),
                ("q", "quit"),
            ]),
            StatusContext::TargetSearch => key_hints(&[("Enter/Esc", "done"), ("^U", "clear"), ("^C", "quit")]),
            StatusContext::BatchRunning => key_hints(&[("q", "quit")]),
            StatusContext::BatchReport => key_hints(&[("↑/↓", "scroll"), ("←/→", "page"), ("Enter", "menu"), ("q", "quit")]),
        };

        (left, right)
    }
}

fn spans_display_width(spans: &[Span<'static>]) -> usize {
    spans.iter().map(|span| display_width(span.content.as_ref())).sum()
}

#[cfg(test)]
#[path = "../../test/tui/ui/status_bar.rs"]
mod tests;
