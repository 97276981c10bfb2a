//! Core TUI state and initialization.

use super::connection_form_state::ConnectionForm;
use crate::batch::{BatchEvent, BatchHandle, BatchResult};
use crate::catalog::{CatalogFetch, CatalogLister};
use crate::connection::{ConnectionDescriptor, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT};
use crate::export::Exporter;
use crate::tui::selection::{DEFAULT_PER_PAGE, SelectionEngine};
use std::{
    cell::Cell,
    sync::Arc,
    time::{Duration, Instant},
};

/// Values used to prefill the connection form and size the target list.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub host: String,
    pub port: String,
    pub user: String,
    pub database: String,
    pub per_page: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.to_string(),
            user: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuOption {
    RunBackup,
    ConfigureConnection,
    Quit,
}

impl MenuOption {
    pub(crate) const ALL: [MenuOption; 3] = [Self::RunBackup, Self::ConfigureConnection, Self::Quit];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::RunBackup => "Run backup",
            Self::ConfigureConnection => "Configure connection",
            Self::Quit => "Quit",
        }
    }
}

/// Input vocabulary understood by the session. Key bindings live in
/// `tui::input`; every screen ignores events it has no use for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionEvent {
    Up,
    Down,
    Left,
    Right,
    NextField,
    PrevField,
    Toggle,
    Confirm,
    Back,
    StartSearch,
    Input(char),
    Backspace,
    ClearField,
    /// Periodic redraw; only animates.
    Tick,
    Quit,
}

/// A dispatched batch and what has been heard from it so far.
#[derive(Debug)]
pub(crate) struct BatchRun {
    pub(crate) handle: Option<BatchHandle>,
    pub(crate) total: usize,
    pub(crate) current: Option<(usize, String)>,
    pub(crate) recorded: usize,
    pub(crate) result: Option<BatchResult>,
    pub(crate) spinner_frame: usize,
    /// First report row shown once the batch is complete.
    pub(crate) scroll: usize,
    /// Largest useful `scroll`, recorded by the last render.
    pub(crate) max_scroll: Cell<usize>,
}

impl BatchRun {
    pub(crate) fn new(handle: BatchHandle) -> Self {
        Self {
            total: handle.targets().len(),
            handle: Some(handle),
            current: None,
            recorded: 0,
            result: None,
            spinner_frame: 0,
            scroll: 0,
            max_scroll: Cell::new(0),
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    pub(crate) fn poll(&mut self) -> Option<BatchEvent> {
        self.handle.as_mut()?.try_next()
    }

    pub(crate) fn apply(&mut self, event: BatchEvent) {
        match event {
            BatchEvent::Started { index, target, .. } => {
                self.current = Some((index, target));
            }
            BatchEvent::Recorded(_) => {
                self.recorded += 1;
            }
            BatchEvent::Completed(result) => {
                self.recorded = result.len();
                self.result = Some(result);
                self.current = None;
                self.handle = None;
            }
        }
    }

    pub(crate) fn scroll_report(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta).min(self.max_scroll.get());
    }

    pub(crate) fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}

/// Workflow screens. Each variant carries only the state that screen owns.
#[derive(Debug)]
pub(crate) enum Screen {
    ConnectionSetup,
    Menu { cursor: usize },
    TargetSelection { search_mode: bool, notice: Option<String> },
    BatchExecution(BatchRun),
}

impl Screen {
    pub(crate) fn menu() -> Self {
        Screen::Menu { cursor: 0 }
    }

    pub(crate) fn target_selection() -> Self {
        Screen::TargetSelection {
            search_mode: false,
            notice: None,
        }
    }
}

/// Main application state.
pub struct Session {
    pub(crate) screen: Screen,
    pub(crate) form: ConnectionForm,
    /// Descriptor that produced the current target list.
    pub(crate) connection: Option<ConnectionDescriptor>,
    pub(crate) selection: SelectionEngine,
    pub(crate) catalog: Arc<dyn CatalogLister>,
    /// Listing started from the connection form, not yet answered.
    pub(crate) pending_fetch: Option<CatalogFetch>,
    pub(crate) exporter: Arc<dyn Exporter>,
    pub(crate) should_exit: bool,
    pub(crate) ui_dirty: bool,
    pub(crate) last_draw_at: Instant,
}

impl Session {
    pub fn new(config: SessionConfig, catalog: Arc<dyn CatalogLister>, exporter: Arc<dyn Exporter>) -> Self {
        Self {
            screen: Screen::ConnectionSetup,
            form: ConnectionForm::new(&config.host, &config.port, &config.user, &config.database),
            connection: None,
            selection: SelectionEngine::new(config.per_page),
            catalog,
            pending_fetch: None,
            exporter,
            should_exit: false,
            ui_dirty: true,
            last_draw_at: Instant::now(),
        }
    }

    pub(crate) fn should_draw(&self, heartbeat: Duration) -> bool {
        self.ui_dirty || self.last_draw_at.elapsed() >= heartbeat
    }

    pub(crate) fn mark_ui_dirty(&mut self) {
        self.ui_dirty = true;
    }

    pub(crate) fn mark_drawn(&mut self) {
        self.last_draw_at = Instant::now();
        self.ui_dirty = false;
    }

    /// Drain pending batch events. Returns whether anything changed.
    pub(crate) fn poll_batch(&mut self) -> bool {
        let Screen::BatchExecution(run) = &mut self.screen else {
            return false;
        };

        let mut changed = false;
        while let Some(event) = run.poll() {
            run.apply(event);
            changed = true;
        }
        changed
    }

    /// Apply the pending catalog listing if it has answered.
    pub(crate) fn poll_connection(&mut self) -> bool {
        let Some(result) = self.pending_fetch.as_ref().and_then(CatalogFetch::try_result) else {
            return false;
        };
        let Some(fetch) = self.pending_fetch.take() else {
            return false;
        };
        self.apply_catalog_result(fetch.into_connection(), result);
        true
    }

    pub(crate) fn is_connecting(&self) -> bool {
        self.pending_fetch.is_some()
    }

    pub(crate) fn has_running_batch(&self) -> bool {
        matches!(&self.screen, Screen::BatchExecution(run) if !run.is_complete())
    }

    pub(crate) fn set_target_notice(&mut self, message: impl Into<String>) {
        if let Screen::TargetSelection { notice, .. } = &mut self.screen {
            *notice = Some(message.into());
        }
    }
}

#[cfg(test)]
#[path = "../../test/tui/state/app_state.rs"]
mod tests;
