//! Bevel engine crate.
//!
//! This crate owns the platform pieces used by the widget layer: geometry,
//! 8-bit colors, the offscreen raster, text services and input translation.

pub mod input;
pub mod time;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod raster;
pub mod text;
