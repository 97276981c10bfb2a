//! Target list event handling: navigation, search and batch start.

use crate::batch::dispatch_batch;
use crate::tui::{BatchRun, Screen, Session, SessionEvent};
use crate::{log_debug, log_error};

const EMPTY_SELECTION_NOTICE: &str = "Select at least one database to back up";

impl Session {
    pub(crate) fn handle_target_list_event(&mut self, event: SessionEvent) {
        let Screen::TargetSelection { search_mode, notice } = &mut self.screen else {
            return;
        };

        if *search_mode {
            match event {
                SessionEvent::Input(ch) => {
                    let mut query = self.selection.filter().to_string();
                    query.push(ch);
                    self.selection.set_filter(&query);
                }
                SessionEvent::Backspace => {
                    let mut query = self.selection.filter().to_string();
                    query.pop();
                    self.selection.set_filter(&query);
                }
                SessionEvent::ClearField => self.selection.set_filter(""),
                SessionEvent::Up => self.selection.move_cursor(-1),
                SessionEvent::Down => self.selection.move_cursor(1),
                SessionEvent::Confirm | SessionEvent::Back => *search_mode = false,
                _ => {}
            }
            return;
        }

        match event {
            SessionEvent::Up => self.selection.move_cursor(-1),
            SessionEvent::Down => self.selection.move_cursor(1),
            SessionEvent::Left => self.selection.prev_page(),
            SessionEvent::Right => self.selection.next_page(),
            SessionEvent::Toggle => {
                *notice = None;
                self.selection.toggle_at_cursor();
            }
            SessionEvent::StartSearch => {
                *notice = None;
                *search_mode = true;
            }
            SessionEvent::Back => self.screen = Screen::menu(),
            SessionEvent::Confirm => self.start_batch(),
            _ => {}
        }
    }

    /// Dispatch a batch over the selected real targets, in master order.
    pub(crate) fn start_batch(&mut self) {
        let targets = self.selection.selected_real_targets();
        if targets.is_empty() {
            self.set_target_notice(EMPTY_SELECTION_NOTICE);
            return;
        }

        let Some(connection) = self.connection.clone() else {
            self.set_target_notice("No active connection");
            return;
        };

        log_debug!("Starting backup of {} database(s)", targets.len());
        match dispatch_batch(connection, targets, self.exporter.clone()) {
            Ok(handle) => self.screen = Screen::BatchExecution(BatchRun::new(handle)),
            Err(err) => {
                log_error!("Failed to start backup worker: {}", err);
                self.set_target_notice(format!("Failed to start backup: {}", err));
            }
        }
    }
}
