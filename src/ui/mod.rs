//! Terminal UI: rendering and input translation.

pub mod input;
pub mod render;
pub mod styles;
