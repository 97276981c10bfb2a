//! TUI bootstrap and teardown lifecycle.

use super::events::run_app;
use crate::catalog::CatalogLister;
use crate::export::Exporter;
use crate::tui::{Session, SessionConfig};
use crate::{log_debug, log_error};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, sync::Arc};

#[derive(Debug, Default)]
struct TerminalModeGuard {
    active: bool,
}

impl TerminalModeGuard {
    // Terminal mode lifecycle.
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self { active: true })
    }

    fn cleanup(&mut self) {
        if !self.active {
            return;
        }

        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        self.active = false;
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Run the interactive backup session until the operator quits.
pub fn run_session(config: SessionConfig, catalog: Arc<dyn CatalogLister>, exporter: Arc<dyn Exporter>) -> io::Result<()> {
    log_debug!("Starting interactive session");

    let mut mode_guard = TerminalModeGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut session = Session::new(config, catalog, exporter);
    let result = run_app(&mut terminal, &mut session);
    let show_cursor_result = terminal.show_cursor();

    mode_guard.cleanup();

    if let Err(err) = result {
        log_error!("Session error: {}", err);
        return Err(err);
    }

    if let Err(err) = show_cursor_result {
        log_error!("Failed to restore cursor visibility: {}", err);
        return Err(err);
    }

    if session.has_running_batch() {
        log_error!("Exited while a backup batch was still running; the worker was left detached");
    }

    log_debug!("Session exited");
    Ok(())
}
