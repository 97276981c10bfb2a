//! Connection form state.

use crate::connection::ConnectionDescriptor;
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConnectionField {
    Host,
    Port,
    User,
    Password,
    Database,
}

impl ConnectionField {
    pub(crate) const ALL: [ConnectionField; 5] = [Self::Host, Self::Port, Self::User, Self::Password, Self::Database];

    // Focus traversal helpers. Tab wraps, arrows stop at the ends.
    pub(crate) fn next(self) -> Self {
        match self {
            Self::Host => Self::Port,
            Self::Port => Self::User,
            Self::User => Self::Password,
            Self::Password => Self::Database,
            Self::Database => Self::Host,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Host => Self::Database,
            Self::Port => Self::Host,
            Self::User => Self::Port,
            Self::Password => Self::User,
            Self::Database => Self::Password,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Host => "Host",
            Self::Port => "Port",
            Self::User => "User",
            Self::Password => "Password",
            Self::Database => "Database",
        }
    }
}

/// In-progress connection parameters as typed by the operator.
#[derive(Debug, Clone)]
pub(crate) struct ConnectionForm {
    pub(crate) host: String,
    pub(crate) port: String,
    pub(crate) user: String,
    pub(crate) password: Zeroizing<String>,
    pub(crate) database: String,
    pub(crate) selected: ConnectionField,
    pub(crate) error: Option<String>,
}

impl ConnectionForm {
    pub(crate) fn new(host: &str, port: &str, user: &str, database: &str) -> Self {
        Self {
            host: host.to_string(),
            port: port.to_string(),
            user: user.to_string(),
            password: Zeroizing::new(String::new()),
            database: database.to_string(),
            selected: ConnectionField::Host,
            error: None,
        }
    }

    fn field_mut(&mut self, field: ConnectionField) -> &mut String {
        match field {
            ConnectionField::Host => &mut self.host,
            ConnectionField::Port => &mut self.port,
            ConnectionField::User => &mut self.user,
            ConnectionField::Password => &mut *self.password,
            ConnectionField::Database => &mut self.database,
        }
    }

    pub(crate) fn value(&self, field: ConnectionField) -> &str {
        match field {
            ConnectionField::Host => &self.host,
            ConnectionField::Port => &self.port,
            ConnectionField::User => &self.user,
            ConnectionField::Password => self.password.as_str(),
            ConnectionField::Database => &self.database,
        }
    }

    /// Value as it should be displayed; the password is masked.
    pub(crate) fn display_value(&self, field: ConnectionField) -> String {
        match field {
            ConnectionField::Password => "*".repeat(self.password.chars().count()),
            _ => self.value(field).to_string(),
        }
    }

    pub(crate) fn focus_next(&mut self) {
        self.selected = self.selected.next();
    }

    pub(crate) fn focus_prev(&mut self) {
        self.selected = self.selected.prev();
    }

    pub(crate) fn focus_down(&mut self) {
        if self.selected != ConnectionField::Database {
            self.selected = self.selected.next();
        }
    }

    pub(crate) fn focus_up(&mut self) {
        if self.selected != ConnectionField::Host {
            self.selected = self.selected.prev();
        }
    }

    pub(crate) fn insert_char(&mut self, ch: char) {
        let field = self.selected;
        self.field_mut(field).push(ch);
        self.error = None;
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.selected;
        self.field_mut(field).pop();
        self.error = None;
    }

    pub(crate) fn clear_field(&mut self) {
        let field = self.selected;
        self.field_mut(field).clear();
        self.error = None;
    }

    pub(crate) fn to_descriptor(&self) -> ConnectionDescriptor {
        ConnectionDescriptor::new(
            self.host.trim(),
            self.port.trim(),
            self.user.trim(),
            self.password.as_str(),
            self.database.trim(),
        )
    }
}

#[cfg(test)]
#[path = "../../test/tui/state/connection_form_state.rs"]
mod tests;
