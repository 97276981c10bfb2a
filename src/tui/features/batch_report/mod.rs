mod input;
mod render;
