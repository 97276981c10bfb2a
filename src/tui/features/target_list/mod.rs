//! Target list navigation, search and batch start.

mod input;
mod render;
