//! Text services: font handles, measurement and rasterization.
//!
//! Widgets never talk to `fontdue` directly. They go through [`TextBackend`],
//! which [`FontSystem`] implements and tests can replace with a fixed-advance
//! stand-in.

mod backend;
mod font_system;

pub use backend::{Font, FontId, TextBackend};
pub use font_system::{FontLoadError, FontSystem};
