//! Paint model shared between the raster and the widgets.
//!
//! Scope:
//! - 8-bit straight-alpha color
//! - named / hex color parsing
//! - bevel shading (`lighter`, `darker`)

pub mod color;
mod named;
pub mod shade;

pub use color::Color;
pub use shade::{darker, lighter, BevelTones};
