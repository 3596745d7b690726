//! Coordinate and geometry types shared by the raster and the widget layer.
//!
//! Canonical space:
//! - Integer surface pixels
//! - Origin top-left
//! - +X right, +Y down

mod point;
mod rect;

pub use point::Point;
pub use rect::Rect;
