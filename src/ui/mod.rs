//! Terminal rendering of the mass matrix and the detail panel

pub mod colors;
pub mod display;
pub mod renderer;

pub use colors::*;
pub use display::*;
pub use renderer::{cell_at, render_ui};
