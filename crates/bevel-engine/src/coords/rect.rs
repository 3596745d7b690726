use super::Point;

/// Axis-aligned rectangle in surface pixels (top-left origin).
///
/// Width and height are signed so that rectangles arriving from application
/// code can be validated instead of silently wrapping; use [`Rect::is_empty`]
/// to reject degenerate bounds.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub const fn from_origin_size(origin: Point, w: i32, h: i32) -> Self {
        Self { x: origin.x, y: origin.y, w, h }
    }

    #[inline]
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bottom-right corner (exclusive), `None` when it does not fit in `i32`.
    #[inline]
    pub fn checked_max(self) -> Option<Point> {
        Some(Point::new(self.x.checked_add(self.w)?, self.y.checked_add(self.h)?))
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.x;
        let mut y = self.y;
        let mut w = self.w;
        let mut h = self.h;

        if w < 0 {
            x += w;
            w = -w;
        }
        if h < 0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        let r = self.normalized();
        p.x >= r.x && p.y >= r.y && p.x < (r.x + r.w) && p.y < (r.y + r.h)
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.x.max(b.x);
        let y0 = a.y.max(b.y);
        let x1 = (a.x + a.w).min(b.x + b.w);
        let y1 = (a.y + a.h).min(b.y + b.h);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0 || h <= 0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

}

impl From<(i32, i32, i32, i32)> for Rect {
    #[inline]
    fn from((x, y, w, h): (i32, i32, i32, i32)) -> Self {
        Rect::new(x, y, w, h)
    }
}
