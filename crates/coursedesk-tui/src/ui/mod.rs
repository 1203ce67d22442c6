//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, header, views and forms
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling

pub mod input;
pub mod render;
pub mod styles;
