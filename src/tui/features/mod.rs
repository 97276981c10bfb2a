//! Feature-sliced TUI behavior, one module per screen.

pub(crate) mod batch_report;
pub(crate) mod connection;
pub(crate) mod menu;
pub(crate) mod target_list;
