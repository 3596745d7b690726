use std::rc::Rc;

use bevel_engine::coords::Rect;
use bevel_engine::raster::Image;
use bevel_engine::text::TextBackend;

use crate::error::WidgetError;
use crate::painter::Painter;

/// Text services shared by every widget of a UI.
///
/// Widgets re-render on state changes outside any paint pass, so each one
/// keeps a handle to the backend rather than borrowing it per frame.
pub type SharedText = Rc<dyn TextBackend>;

// ── Widget trait ──────────────────────────────────────────────────────────

/// The core trait every widget implements.
///
/// A widget owns a rectangle and a backing image of exactly that size. It
/// redraws the image in [`render`](Widget::render) whenever its state changes
/// and composes it onto a surface in [`draw`](Widget::draw), which never
/// changes state.
pub trait Widget {
    /// Shared state: rectangle, display text and backing image.
    fn core(&self) -> &WidgetCore;

    /// Redraw the backing image from current attributes.
    ///
    /// The default does nothing; concrete widgets override it.
    fn render(&mut self) {}

    #[inline]
    fn rect(&self) -> Rect {
        self.core().rect()
    }

    #[inline]
    fn image(&self) -> &Image {
        self.core().image()
    }

    /// Blit the backing image at the widget's rectangle onto `surface`.
    #[inline]
    fn draw(&self, surface: &mut Image) {
        self.core().draw(surface)
    }

    /// Number of renders so far. Increases by one per redraw.
    #[inline]
    fn revision(&self) -> u64 {
        self.core().revision()
    }
}

// ── WidgetCore ────────────────────────────────────────────────────────────

/// Rectangle + display text + backing image.
///
/// Invariant: the image is always exactly `rect.w × rect.h`.
#[derive(Debug, Clone)]
pub struct WidgetCore {
    rect: Rect,
    pub(crate) text: String,
    image: Image,
    revision: u64,
}

impl WidgetCore {
    /// Fails with [`WidgetError::InvalidGeometry`] for empty rectangles and for
    /// rectangles whose far edge does not fit in `i32`.
    pub fn new(rect: Rect, text: impl Into<String>) -> Result<Self, WidgetError> {
        validate_rect(rect)?;
        Ok(Self {
            rect,
            text: text.into(),
            image: Image::new(rect.w as u32, rect.h as u32),
            revision: 0,
        })
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn image(&self) -> &Image {
        &self.image
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Moves/resizes the widget. The image is reallocated only when the size
    /// changes; its content is stale until the next render.
    pub(crate) fn set_rect(&mut self, rect: Rect) -> Result<(), WidgetError> {
        validate_rect(rect)?;
        if rect.w != self.rect.w || rect.h != self.rect.h {
            self.image = Image::new(rect.w as u32, rect.h as u32);
        }
        self.rect = rect;
        Ok(())
    }

    pub fn draw(&self, surface: &mut Image) {
        surface.blit(&self.image, self.rect.origin());
    }

    /// Starts a render pass over the backing image.
    pub(crate) fn painter<'a>(&'a mut self, fonts: &'a dyn TextBackend) -> Painter<'a> {
        self.revision += 1;
        Painter::new(&mut self.image, fonts)
    }
}

pub(crate) fn validate_rect(rect: Rect) -> Result<(), WidgetError> {
    if rect.is_empty() || rect.checked_max().is_none() {
        return Err(WidgetError::InvalidGeometry { rect });
    }
    Ok(())
}
