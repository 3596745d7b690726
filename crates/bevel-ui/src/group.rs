//! Insertion-ordered widget collections.
//!
//! A group owns its widgets and hands out [`WidgetId`]s for addressing them.
//! Iteration, drawing and hit testing all follow insertion order.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bevel_engine::coords::Point;
use bevel_engine::raster::Image;

use crate::error::WidgetError;
use crate::widget::Widget;
use crate::widgets::button::{Button, ButtonConfig, ButtonEvent, ButtonSettings};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

// ── WidgetId ──────────────────────────────────────────────────────────────

/// Unique identifier for a widget registered with a group.
///
/// Ids are allocated from a process-wide counter and never reused, so an id
/// from one group is never valid in another.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    fn next() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── WidgetGroup ───────────────────────────────────────────────────────────

/// Widgets of one kind in insertion order.
pub struct WidgetGroup<W> {
    items: Vec<(WidgetId, W)>,
}

impl<W> WidgetGroup<W> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends `widget` and returns its id.
    pub fn add(&mut self, widget: W) -> WidgetId {
        let id = WidgetId::next();
        self.items.push((id, widget));
        id
    }

    /// Removes and returns the widget, keeping the order of the rest.
    pub fn remove(&mut self, id: WidgetId) -> Option<W> {
        let index = self.items.iter().position(|(i, _)| *i == id)?;
        Some(self.items.remove(index).1)
    }

    pub fn get(&self, id: WidgetId) -> Option<&W> {
        self.items.iter().find(|(i, _)| *i == id).map(|(_, w)| w)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut W> {
        self.items.iter_mut().find(|(i, _)| *i == id).map(|(_, w)| w)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &W)> {
        self.items.iter().map(|(id, w)| (*id, w))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (WidgetId, &mut W)> {
        self.items.iter_mut().map(|(id, w)| (*id, w))
    }

    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.items.iter().map(|(id, _)| *id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<W: Widget> WidgetGroup<W> {
    /// Blits every widget onto `surface`, later ones on top.
    pub fn draw(&self, surface: &mut Image) {
        for (_, w) in &self.items {
            w.draw(surface);
        }
    }
}

impl<W> Default for WidgetGroup<W> {
    fn default() -> Self {
        Self::new()
    }
}

// ── ButtonGroup ───────────────────────────────────────────────────────────

pub type ButtonGroup = WidgetGroup<Button>;

impl WidgetGroup<Button> {
    /// Runs [`Button::update`] on every button in order and collects the
    /// transitions.
    pub fn update(&mut self, pointer: Option<Point>, held: bool) -> Vec<(WidgetId, ButtonEvent)> {
        self.items
            .iter_mut()
            .filter_map(|(id, b)| b.update(pointer, held).map(|ev| (*id, ev)))
            .collect()
    }

    pub fn configure(
        &mut self,
        id: WidgetId,
        patch: ButtonConfig,
    ) -> Result<ButtonSettings, WidgetError> {
        self.get_mut(id)
            .ok_or(WidgetError::UnknownWidget(id))?
            .configure(patch)
    }
}
