//! Frame layout and per-screen render dispatch.

use super::ui::theme;
use super::{Screen, Session};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

impl Session {
    pub(crate) fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        self.render_header(frame, chunks[0]);

        match &self.screen {
            Screen::ConnectionSetup => self.render_connection_form(frame, chunks[1]),
            Screen::Menu { cursor } => self.render_menu(frame, chunks[1], *cursor),
            Screen::TargetSelection { search_mode, notice } => self.render_target_list(frame, chunks[1], *search_mode, notice.as_deref()),
            Screen::BatchExecution(run) => self.render_batch_report(frame, chunks[1], run),
        }

        self.render_global_status_bar(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" snaptui ", theme::title_style()),
            Span::styled("PostgreSQL backup", theme::hint_style()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let popup_width = width.min(area.width);
        let popup_height = height.min(area.height);
        let popup_x = area.x + area.width.saturating_sub(popup_width) / 2;
        let popup_y = area.y + area.height.saturating_sub(popup_height) / 2;
        Rect::new(popup_x, popup_y, popup_width, popup_height)
    }
}
