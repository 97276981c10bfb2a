//! Main menu event handling.

use crate::tui::{MenuOption, Screen, Session, SessionEvent};

impl Session {
    pub(crate) fn handle_menu_event(&mut self, event: SessionEvent) {
        let Screen::Menu { cursor } = &mut self.screen else {
            return;
        };

        match event {
            SessionEvent::Up => *cursor = cursor.saturating_sub(1),
            SessionEvent::Down => *cursor = (*cursor + 1).min(MenuOption::ALL.len() - 1),
            SessionEvent::Confirm => {
                let option = MenuOption::ALL[(*cursor).min(MenuOption::ALL.len() - 1)];
                self.activate_menu_option(option);
            }
            _ => {}
        }
    }

    pub(crate) fn activate_menu_option(&mut self, option: MenuOption) {
        match option {
            MenuOption::RunBackup => {
                if self.selection.master_len() > 0 {
                    self.screen = Screen::target_selection();
                }
            }
            MenuOption::ConfigureConnection => {
                self.form.error = None;
                self.screen = Screen::ConnectionSetup;
            }
            MenuOption::Quit => self.should_exit = true,
        }
    }
}
