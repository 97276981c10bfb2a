//! Batch progress and report rendering.

use crate::batch::BatchResult;
use crate::tui::ui::theme;
use crate::tui::{BatchRun, Session};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const DETAIL_INDENT: &str = "    ";

impl Session {
    pub(crate) fn render_batch_report(&self, frame: &mut Frame, area: Rect, run: &BatchRun) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::primary()))
            .title(if run.is_complete() { " Backup Report " } else { " Backup " });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(result) = &run.result else {
            frame.render_widget(Paragraph::new(progress_lines(run)), inner);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);
        let body = chunks[0];

        let lines = report_lines(result, body.width as usize);
        let lines_total = lines.len();
        let max_scroll = lines_total.saturating_sub(body.height as usize);
        run.max_scroll.set(max_scroll);
        let offset = run.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines).scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
        frame.render_widget(paragraph, body);

        if max_scroll > 0 {
            let position = format!("rows {}-{} of {}", offset + 1, offset + body.height as usize, lines_total);
            frame.render_widget(Paragraph::new(Line::from(Span::styled(position, theme::hint_style()))), chunks[1]);
        }
    }
}

/// Summary, then failures, then artifacts. Failures lead so they are on the
/// first page however many targets succeeded.
fn report_lines(result: &BatchResult, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Backup finished: ", theme::title_style()),
            Span::styled(format!("{} succeeded", result.success_count()), Style::default().fg(theme::success())),
            Span::raw(", "),
            Span::styled(format!("{} failed", result.failure_count()), Style::default().fg(theme::failure())),
        ]),
        Line::from(""),
    ];
    let detail_width = width.saturating_sub(DETAIL_INDENT.len());

    for (target, diagnostic) in result.failures() {
        lines.push(Line::from(vec![
            Span::styled("✗ ", Style::default().fg(theme::failure())),
            Span::styled(target.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        for detail in diagnostic.lines().filter(|line| !line.trim().is_empty()) {
            for row in theme::wrap_to_display_width(detail, detail_width) {
                lines.push(Line::from(Span::styled(
                    format!("{}{}", DETAIL_INDENT, row),
                    Style::default().fg(theme::failure()),
                )));
            }
        }
    }

    for (target, artifact) in result.artifacts() {
        let arrow = format!(" -> {}", artifact);
        let head = vec![
            Span::styled("✓ ", Style::default().fg(theme::success())),
            Span::styled(target.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ];
        if 2 + theme::display_width(target) + theme::display_width(&arrow) <= width {
            let mut spans = head;
            spans.push(Span::styled(arrow, theme::hint_style()));
            lines.push(Line::from(spans));
        } else {
            lines.push(Line::from(head));
            for row in theme::wrap_to_display_width(&format!("-> {}", artifact), detail_width) {
                lines.push(Line::from(Span::styled(format!("{}{}", DETAIL_INDENT, row), theme::hint_style())));
            }
        }
    }

    lines
}

fn progress_lines(run: &BatchRun) -> Vec<Line<'static>> {
    let spinner = theme::spinner_frame(run.spinner_frame);
    let status = match &run.current {
        Some((index, target)) => format!("Backing up {} of {}: {}", index + 1, run.total, target),
        None => format!("Preparing backup of {} database(s)", run.total),
    };

    vec![
        Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(theme::primary())),
            Span::raw(status),
        ]),
        Line::from(Span::styled(format!("{} of {} finished", run.recorded, run.total), theme::hint_style())),
    ]
}

#[cfg(test)]
#[path = "../../../test/tui/features/batch_report/render.rs"]
mod tests;
