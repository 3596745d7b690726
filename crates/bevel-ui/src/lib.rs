//! Bevel UI: retained-mode bevelled widgets on top of `bevel-engine`.
//!
//! Every widget owns a fixed rectangle and an offscreen image it re-renders
//! whenever its state changes. Groups own the widgets, route input to them and
//! compose their images onto a surface.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use bevel_ui::prelude::*;
//!
//! let mut fonts = FontSystem::new();
//! fonts.load_font(include_bytes!("my_font.ttf"))?;
//!
//! let mut ui = UiScene::new(Rc::new(fonts));
//! ui.add_button(
//!     Rect::new(10, 10, 100, 30),
//!     ButtonConfig::new().text("Click me").on_press(|| println!("clicked!")),
//! )?;
//! let name = ui.add_entry(Rect::new(10, 50, 160, 24), EntryConfig::new().prompt("Name"))?;
//!
//! // In your frame callback:
//! ui.frame(&UiInput::from_frame(&input_state, &input_frame), clock.tick().now);
//! ui.draw(&mut surface);
//! println!("{}", ui.entries.get_text(name).unwrap_or_default());
//! ```
//!
//! # Colors and fonts
//!
//! Widget colors accept anything convertible into [`coerce::ColorSpec`]
//! (`[u8; 3]`, `0xRRGGBB`, `"red"`, `"#336699"`, [`Color`](bevel_engine::paint::Color));
//! fonts accept a resolved face or a `"family_14b"` descriptor. Malformed input
//! falls back to defaults instead of failing.

pub mod coerce;
pub mod error;
pub mod event;
pub mod focus;
pub mod group;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

#[cfg(test)]
mod testing;

/// Everything you need to build a UI — import this in your application.
pub mod prelude {
    pub use crate::coerce::{ColorSpec, FontSpec};
    pub use crate::error::WidgetError;
    pub use crate::event::EventResult;
    pub use crate::focus::{EntryGroup, EntryGroupConfig, MissPolicy};
    pub use crate::group::{ButtonGroup, WidgetGroup, WidgetId};
    pub use crate::painter::{BevelStyle, Painter};
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::widget::{SharedText, Widget, WidgetCore};
    pub use crate::widgets::{
        button::{Button, ButtonConfig, ButtonEvent, ButtonSettings},
        entry::{Entry, EntryConfig, EntrySettings},
    };

    // Re-export the engine primitives everyone needs.
    pub use bevel_engine::coords::{Point, Rect};
    pub use bevel_engine::input::{Key, KeyEvent};
    pub use bevel_engine::paint::Color;
    pub use bevel_engine::raster::Image;
    pub use bevel_engine::text::{Font, FontSystem, TextBackend};
}
