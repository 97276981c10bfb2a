//! Target list rendering.

use crate::tui::Session;
use crate::tui::ui::theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

impl Session {
    pub(crate) fn render_target_list(&self, frame: &mut Frame, area: Rect, search_mode: bool, notice: Option<&str>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(area);

        let filter = self.selection.filter();
        let title = if search_mode {
            format!(" Databases (Search: {}_) ", filter)
        } else if !filter.is_empty() {
            format!(" Databases (filter: {}) ", filter)
        } else {
            " Databases ".to_string()
        };

        let name_width = (chunks[0].width as usize).saturating_sub(8);
        let page_items = self.selection.current_page_items();
        let items: Vec<ListItem> = page_items
            .iter()
            .map(|target| {
                let mark = if self.selection.is_selected(target.master_index) { "[x] " } else { "[ ] " };
                let mark_style = if self.selection.is_selected(target.master_index) {
                    Style::default().fg(theme::success())
                } else {
                    theme::hint_style()
                };
                let name_style = if target.is_aggregate() {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, mark_style),
                    Span::styled(theme::truncate_to_display_width(&target.name, name_width), name_style),
                ]))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if search_mode { theme::highlight() } else { theme::primary() }))
            .title(title);

        if self.selection.filtered_len() == 0 {
            let empty = Paragraph::new(Line::from(Span::styled("No databases match the filter", theme::hint_style()))).block(block);
            frame.render_widget(empty, chunks[0]);
        } else {
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().fg(theme::primary()).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(self.selection.cursor()));
            frame.render_stateful_widget(list, chunks[0], &mut state);
        }

        let (first, last, total) = self.selection.page_window();
        let selected = self.selection.selected_real_targets().len();
        let mut footer = vec![Line::from(vec![
            Span::styled(
                format!("Page {}/{}", self.selection.page_index() + 1, self.selection.total_pages()),
                Style::default().fg(theme::primary()),
            ),
            Span::styled(format!("  showing {}-{} of {}", first, last, total), theme::hint_style()),
            Span::styled(format!("  {} selected", selected), Style::default().fg(theme::success())),
        ])];
        if self.selection.all_selected() {
            footer[0].spans.push(Span::styled("  (all)", Style::default().fg(theme::success())));
        }
        if let Some(notice) = notice {
            footer.push(Line::from(Span::styled(notice.to_string(), Style::default().fg(theme::highlight()))));
        }
        frame.render_widget(Paragraph::new(footer), chunks[1]);
    }
}
