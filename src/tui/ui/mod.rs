pub(crate) mod status_bar;
pub(crate) mod theme;
