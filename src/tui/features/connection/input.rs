//! Connection form event handling.

use crate::catalog::{self, ConnectionError};
use crate::connection::ConnectionDescriptor;
use crate::tui::{Screen, Session, SessionEvent};
use crate::{log_debug, log_error, log_info};
use std::sync::Arc;

impl Session {
    pub(crate) fn handle_connection_event(&mut self, event: SessionEvent) {
        if self.is_connecting() {
            // The form is frozen until the listing answers; Esc abandons it.
            if event == SessionEvent::Back {
                self.abandon_connection();
            }
            return;
        }

        match event {
            SessionEvent::Up => self.form.focus_up(),
            SessionEvent::Down => self.form.focus_down(),
            SessionEvent::NextField => self.form.focus_next(),
            SessionEvent::PrevField => self.form.focus_prev(),
            SessionEvent::Input(ch) => self.form.insert_char(ch),
            SessionEvent::Backspace => self.form.backspace(),
            SessionEvent::ClearField => self.form.clear_field(),
            SessionEvent::Confirm => self.submit_connection(),
            SessionEvent::Back => {
                if self.connection.is_some() {
                    self.form.error = None;
                    self.screen = Screen::menu();
                }
            }
            _ => {}
        }
    }

    /// Start fetching the catalog with the form's parameters. The form only
    /// becomes the active connection when the fetch succeeds.
    pub(crate) fn submit_connection(&mut self) {
        let descriptor = self.form.to_descriptor();
        log_debug!("Submitting connection form for {}", descriptor.label());

        match catalog::dispatch_fetch(Arc::clone(&self.catalog), descriptor) {
            Ok(fetch) => {
                self.form.error = None;
                self.pending_fetch = Some(fetch);
            }
            Err(err) => {
                log_error!("Unable to start catalog fetch: {}", err);
                self.form.error = Some(format!("Unable to start catalog fetch: {}", err));
            }
        }
    }

    fn abandon_connection(&mut self) {
        if let Some(fetch) = self.pending_fetch.take() {
            log_debug!("Abandoned catalog fetch from {}", fetch.connection().label());
        }
        if self.connection.is_some() {
            self.screen = Screen::menu();
        }
    }

    pub(crate) fn apply_catalog_result(&mut self, descriptor: ConnectionDescriptor, result: Result<Vec<String>, ConnectionError>) {
        match result {
            Ok(names) => {
                log_info!("Catalog on {} lists {} database(s)", descriptor.label(), names.len());
                self.selection.set_targets(names);
                self.connection = Some(descriptor);
                self.form.error = None;
                self.screen = Screen::menu();
            }
            Err(err) => {
                log_error!("Catalog fetch from {} failed: {}", descriptor.label(), err);
                self.form.error = Some(err.to_string());
            }
        }
    }
}
