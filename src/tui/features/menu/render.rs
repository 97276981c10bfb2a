//! Main menu rendering.

use crate::tui::ui::theme;
use crate::tui::{MenuOption, Session};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

impl Session {
    pub(crate) fn render_menu(&self, frame: &mut Frame, full_area: Rect, cursor: usize) {
        let area = Self::centered_rect(40, MenuOption::ALL.len() as u16 + 4, full_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::primary()))
            .title(" Main Menu ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = MenuOption::ALL
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                if idx == cursor {
                    Line::from(Span::styled(
                        format!("> {}", option.label()),
                        Style::default().fg(theme::primary()).add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {}", option.label()))
                }
            })
            .collect();

        if self.connection.is_some() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{} database(s) available", self.selection.real_target_count()),
                theme::hint_style(),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
