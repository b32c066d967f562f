//! Display module
//!
//! This module turns remaining seconds into display strings and writes them
//! to a display surface.

pub mod formatter;
pub mod surface;

// Re-export main types
pub use formatter::{format_remaining, TimeComponents};
pub use surface::{
    stdout_surface, DisplaySurface, Frame, HtmlSurface, JsonSurface, MemorySurface, SurfaceStyle,
    TextSurface, SURFACE_ID,
};
