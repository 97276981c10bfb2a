//! Terminal lifecycle and the main event loop.

mod events;
mod run;

pub use run::run_session;
