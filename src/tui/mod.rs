//! Interactive database picker and backup runner.

mod app;
mod features;
mod input;
mod render;
mod selection;
mod state;
mod ui;

pub(crate) use state::{BatchRun, ConnectionField, MenuOption, Screen, SessionEvent};
pub use selection::DEFAULT_PER_PAGE;
pub use state::{Session, SessionConfig};

pub use app::run_session;
