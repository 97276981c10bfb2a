//! TUI state model split by feature domain.

mod app_state;
mod connection_form_state;

pub use app_state::{Session, SessionConfig};
pub(crate) use app_state::{BatchRun, MenuOption, Screen, SessionEvent};
pub(crate) use connection_form_state::ConnectionField;
