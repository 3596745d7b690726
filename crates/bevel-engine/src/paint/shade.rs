use super::Color;

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[inline]
fn channel(v: f64) -> u8 {
    // `as` saturates for floats; truncation toward zero is intended.
    v.clamp(0.0, 255.0) as u8
}

/// Moves every channel toward 255 by `amount` (0 = unchanged, 1 = white).
///
/// Alpha is untouched. `amount` is clamped to [0, 1].
pub fn lighter(color: Color, amount: f64) -> Color {
    let t = amount.clamp(0.0, 1.0);
    Color {
        r: channel(lerp(color.r as f64, 255.0, t)),
        g: channel(lerp(color.g as f64, 255.0, t)),
        b: channel(lerp(color.b as f64, 255.0, t)),
        a: color.a,
    }
}

/// Scales every channel by `amount`: the fraction of the original that is kept
/// (0 = black, 1 = unchanged).
///
/// Alpha is untouched. `amount` is clamped to [0, 1].
pub fn darker(color: Color, amount: f64) -> Color {
    let t = amount.clamp(0.0, 1.0);
    Color {
        r: channel(lerp(0.0, color.r as f64, t)),
        g: channel(lerp(0.0, color.g as f64, t)),
        b: channel(lerp(0.0, color.b as f64, t)),
        a: color.a,
    }
}

/// Bevel shades derived from one base color.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BevelTones {
    /// Highlight edge, `lighter(base, .6)`.
    pub light: Color,
    /// Outer shadow, `darker(base, .6)`.
    pub deep: Color,
    /// Middle shadow ring, `darker(base, .7)`.
    pub shadow: Color,
    /// Inner shadow ring, `darker(base, .9)`.
    pub soft: Color,
    /// Face fill.
    pub face: Color,
}

impl BevelTones {
    pub fn from_base(base: Color) -> Self {
        Self {
            light: lighter(base, 0.6),
            deep: darker(base, 0.6),
            shadow: darker(base, 0.7),
            soft: darker(base, 0.9),
            face: base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [Color; 5] = [
        Color::rgb(0, 0, 0),
        Color::rgb(255, 255, 255),
        Color::rgb(0xf0, 0xf0, 0xf0),
        Color::rgb(12, 200, 97),
        Color::rgba(1, 2, 3, 4),
    ];

    // ── endpoints ─────────────────────────────────────────────────────────

    #[test]
    fn lighter_zero_is_identity() {
        for c in SAMPLES {
            assert_eq!(lighter(c, 0.0), c);
        }
    }

    #[test]
    fn lighter_one_is_white_with_same_alpha() {
        for c in SAMPLES {
            assert_eq!(lighter(c, 1.0), Color::rgba(255, 255, 255, c.a));
        }
    }

    #[test]
    fn darker_zero_is_black_with_same_alpha() {
        for c in SAMPLES {
            assert_eq!(darker(c, 0.0), Color::rgba(0, 0, 0, c.a));
        }
    }

    #[test]
    fn darker_one_is_identity() {
        for c in SAMPLES {
            assert_eq!(darker(c, 1.0), c);
        }
    }

    // ── shape ─────────────────────────────────────────────────────────────

    #[test]
    fn channels_are_monotonic_in_amount() {
        let c = Color::rgb(12, 200, 97);
        let mut prev_l = lighter(c, 0.0);
        let mut prev_d = darker(c, 0.0);
        for step in 1..=20 {
            let t = step as f64 / 20.0;
            let l = lighter(c, t);
            let d = darker(c, t);
            assert!(l.r >= prev_l.r && l.g >= prev_l.g && l.b >= prev_l.b);
            assert!(d.r >= prev_d.r && d.g >= prev_d.g && d.b >= prev_d.b);
            prev_l = l;
            prev_d = d;
        }
    }

    #[test]
    fn out_of_range_amount_is_clamped() {
        let c = Color::rgb(100, 100, 100);
        assert_eq!(lighter(c, 2.0), lighter(c, 1.0));
        assert_eq!(darker(c, -1.0), darker(c, 0.0));
    }

    #[test]
    fn values_are_truncated() {
        // 240 * 0.6 = 144; 100 + 0.5 * 155 = 177.5
        assert_eq!(darker(Color::rgb(240, 240, 240), 0.6), Color::rgb(144, 144, 144));
        assert_eq!(lighter(Color::rgb(100, 100, 100), 0.5), Color::rgb(177, 177, 177));
    }

    #[test]
    fn shading_uses_double_precision() {
        // 90 * 0.7 = 62.99999999999999 in f64; single precision rounds up to 63.
        assert_eq!(darker(Color::rgb(90, 170, 180), 0.7), Color::rgb(62, 118, 125));
    }

    #[test]
    fn bevel_tones_match_shades() {
        let base = Color::rgb(0xf0, 0xf0, 0xf0);
        let t = BevelTones::from_base(base);
        assert_eq!(t.light, lighter(base, 0.6));
        assert_eq!(t.deep, darker(base, 0.6));
        assert_eq!(t.shadow, darker(base, 0.7));
        assert_eq!(t.soft, darker(base, 0.9));
        assert_eq!(t.face, base);
    }
}
