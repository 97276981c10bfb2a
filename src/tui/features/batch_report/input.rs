//! Batch progress and report event handling.

use crate::tui::{Screen, Session, SessionEvent};

const REPORT_PAGE_ROWS: isize = 10;

impl Session {
    pub(crate) fn handle_batch_report_event(&mut self, event: SessionEvent) {
        let Screen::BatchExecution(run) = &mut self.screen else {
            return;
        };

        match event {
            SessionEvent::Tick => run.advance_spinner(),
            SessionEvent::Up if run.is_complete() => run.scroll_report(-1),
            SessionEvent::Down if run.is_complete() => run.scroll_report(1),
            SessionEvent::Left if run.is_complete() => run.scroll_report(-REPORT_PAGE_ROWS),
            SessionEvent::Right if run.is_complete() => run.scroll_report(REPORT_PAGE_ROWS),
            SessionEvent::Confirm | SessionEvent::Back if run.is_complete() => {
                self.selection.clear_selection();
                self.screen = Screen::menu();
            }
            _ => {}
        }
    }
}
