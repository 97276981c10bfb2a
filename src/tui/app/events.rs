//! Event loop.

use crate::tui::{Session, SessionEvent};
use crate::{debug_enabled, log_debug};
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io,
    time::{Duration, Instant},
};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const RENDER_HEARTBEAT: Duration = Duration::from_millis(250);

pub(crate) fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, session: &mut Session) -> io::Result<()> {
    loop {
        if session.poll_batch() {
            session.mark_ui_dirty();
        }
        if session.poll_connection() {
            session.mark_ui_dirty();
        }

        if session.should_draw(RENDER_HEARTBEAT) {
            let render_started_at = Instant::now();
            terminal.draw(|frame| session.draw(frame))?;
            session.mark_drawn();
            if debug_enabled!() {
                log_debug!("TUI frame rendered in {:?}", render_started_at.elapsed());
            }
        }

        if session.should_exit {
            break;
        }

        if event::poll(EVENT_POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => {
                    session.mark_ui_dirty();
                    session.handle_key(key);
                }
                Event::Resize(_, _) => session.mark_ui_dirty(),
                _ => {}
            }
        } else if session.has_running_batch() {
            session.handle_event(SessionEvent::Tick);
            session.mark_ui_dirty();
        }
    }

    Ok(())
}
