//! Offscreen RGBA raster.
//!
//! [`Image`] is the backing store every widget renders into and the surface
//! the application composes widgets onto. It is a thin wrapper over
//! `image::RgbaImage` that speaks the engine's [`Point`] / [`Rect`] / [`Color`]
//! types and clips every operation to its own bounds.

mod error;

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::coords::{Point, Rect};
use crate::paint::Color;

pub use error::ImageSaveError;

/// Straight-alpha RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    buf: RgbaImage,
}

impl Image {
    /// Creates a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self { buf: RgbaImage::new(width, height) }
    }

    /// Creates an image filled with `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self { buf: RgbaImage::from_pixel(width, height, to_rgba(color)) }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Bounds in local pixel space: `(0, 0, width, height)`.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    /// Reads one pixel, `None` outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.bounds().contains(Point::new(x, y)) {
            return None;
        }
        let p = self.buf.get_pixel(x as u32, y as u32);
        Some(Color::from(p.0))
    }

    /// Overwrites every pixel.
    pub fn fill(&mut self, color: Color) {
        let px = to_rgba(color);
        for p in self.buf.pixels_mut() {
            *p = px;
        }
    }

    /// Overwrites the pixels covered by `rect` (clipped to the image).
    ///
    /// No blending: the rectangle replaces what was underneath.
    pub fn fill_rect(&mut self, color: Color, rect: Rect) {
        let Some(r) = rect.intersect(self.bounds()) else {
            return;
        };
        let px = to_rgba(color);
        for y in r.y..r.y + r.h {
            for x in r.x..r.x + r.w {
                self.buf.put_pixel(x as u32, y as u32, px);
            }
        }
    }

    /// Alpha-composites `src` with its top-left corner at `at`.
    pub fn blit(&mut self, src: &Image, at: Point) {
        self.blit_clipped(src, at, self.bounds());
    }

    /// Like [`blit`](Self::blit) but only touches pixels inside `clip`.
    ///
    /// Opaque source pixels replace the destination exactly; translucent ones
    /// are composited with straight-alpha "over".
    pub fn blit_clipped(&mut self, src: &Image, at: Point, clip: Rect) {
        let placed = Rect::from_origin_size(at, src.width() as i32, src.height() as i32);
        let Some(visible) = placed
            .intersect(clip)
            .and_then(|r| r.intersect(self.bounds()))
        else {
            return;
        };
        for y in visible.y..visible.y + visible.h {
            for x in visible.x..visible.x + visible.w {
                let top = *src.buf.get_pixel((x - at.x) as u32, (y - at.y) as u32);
                let under = self.buf.get_pixel_mut(x as u32, y as u32);
                *under = over(*under, top);
            }
        }
    }

    #[inline]
    pub(crate) fn as_rgba_mut(&mut self) -> &mut RgbaImage {
        &mut self.buf
    }

    /// Encodes the image as PNG at `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ImageSaveError> {
        let path = path.as_ref();
        self.buf
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| ImageSaveError::new(path, e.to_string()))?;
        log::debug!("saved {}x{} image to {}", self.width(), self.height(), path.display());
        Ok(())
    }
}

#[inline]
fn to_rgba(c: Color) -> Rgba<u8> {
    Rgba(c.to_array())
}

/// Straight-alpha source-over in integer math.
fn over(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let ta = top.0[3] as u32;
    match ta {
        0 => bottom,
        255 => top,
        _ => {
            let ba = bottom.0[3] as u32;
            // out_a = ta + ba * (1 - ta), scaled by 255.
            let out_a = ta * 255 + ba * (255 - ta);
            if out_a == 0 {
                return Rgba([0, 0, 0, 0]);
            }
            let mix = |t: u8, b: u8| {
                let num = t as u32 * ta * 255 + b as u32 * ba * (255 - ta);
                ((num + out_a / 2) / out_a) as u8
            };
            Rgba([
                mix(top.0[0], bottom.0[0]),
                mix(top.0[1], bottom.0[1]),
                mix(top.0[2], bottom.0[2]),
                ((out_a + 127) / 255) as u8,
            ])
        }
    }
}
