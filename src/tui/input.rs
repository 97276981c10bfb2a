//! Keyboard mapping and top-level event routing.

use super::{Screen, Session, SessionEvent};
use crate::log_debug;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn is_plain_char(key: &KeyEvent) -> bool {
    !key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

/// Keys for screens where letters are typed as text.
fn text_entry_event(key: KeyEvent) -> Option<SessionEvent> {
    let event = match key.code {
        KeyCode::Up => SessionEvent::Up,
        KeyCode::Down => SessionEvent::Down,
        KeyCode::Tab => SessionEvent::NextField,
        KeyCode::BackTab => SessionEvent::PrevField,
        KeyCode::Enter => SessionEvent::Confirm,
        KeyCode::Esc => SessionEvent::Back,
        KeyCode::Backspace => SessionEvent::Backspace,
        KeyCode::Delete => SessionEvent::ClearField,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => SessionEvent::ClearField,
        KeyCode::Char(ch) if is_plain_char(&key) => SessionEvent::Input(ch),
        _ => return None,
    };
    Some(event)
}

/// Keys for list-style screens with vim-style navigation.
fn navigation_event(key: KeyEvent) -> Option<SessionEvent> {
    let event = match key.code {
        KeyCode::Up | KeyCode::Char('k') => SessionEvent::Up,
        KeyCode::Down | KeyCode::Char('j') => SessionEvent::Down,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => SessionEvent::Left,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => SessionEvent::Right,
        KeyCode::Char(' ') => SessionEvent::Toggle,
        KeyCode::Char('/') => SessionEvent::StartSearch,
        KeyCode::Enter => SessionEvent::Confirm,
        KeyCode::Esc => SessionEvent::Back,
        KeyCode::Char('q') => SessionEvent::Quit,
        _ => return None,
    };
    Some(event)
}

impl Session {
    /// Translate a key press into the session's event vocabulary.
    pub(crate) fn event_for_key(&self, key: KeyEvent) -> Option<SessionEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(SessionEvent::Quit);
        }

        match &self.screen {
            Screen::ConnectionSetup => text_entry_event(key),
            Screen::TargetSelection { search_mode: true, .. } => match key.code {
                KeyCode::Char(ch) if is_plain_char(&key) => Some(SessionEvent::Input(ch)),
                _ => text_entry_event(key),
            },
            Screen::Menu { .. } | Screen::TargetSelection { .. } | Screen::BatchExecution(_) => navigation_event(key),
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if let Some(event) = self.event_for_key(key) {
            self.handle_event(event);
        }
    }

    /// Route one event to the active screen.
    pub(crate) fn handle_event(&mut self, event: SessionEvent) {
        if event == SessionEvent::Quit {
            log_debug!("Quit requested");
            self.should_exit = true;
            return;
        }

        match self.screen {
            Screen::ConnectionSetup => self.handle_connection_event(event),
            Screen::Menu { .. } => self.handle_menu_event(event),
            Screen::TargetSelection { .. } => self.handle_target_list_event(event),
            Screen::BatchExecution(_) => self.handle_batch_report_event(event),
        }
    }
}

#[cfg(test)]
#[path = "../test/tui/input.rs"]
mod tests;
