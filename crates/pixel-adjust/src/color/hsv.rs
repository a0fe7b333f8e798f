//! 8-bit HSV with a half-circle hue.
//!
//! Hue is stored as degrees / 2 so it fits a byte: `0..=179`. Saturation and
//! value use the full `0..=255` range. Hue arithmetic must wrap modulo
//! [`HUE_RANGE`], never clip.

/// Number of distinct hue steps (half of 360 degrees).
pub const HUE_RANGE: u8 = 180;

/// One pixel in 8-bit HSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    /// Hue, `0..=179`
    pub h: u8,
    /// Saturation, `0..=255`
    pub s: u8,
    /// Value, `0..=255`
    pub v: u8,
}

impl Hsv {
    #[inline]
    pub fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// Convert `[r, g, b]` to HSV.
///
/// ```
/// use pixel_adjust::color::{rgb_to_hsv, Hsv};
///
/// assert_eq!(rgb_to_hsv([255, 0, 0]), Hsv::new(0, 255, 255));
/// assert_eq!(rgb_to_hsv([0, 255, 0]), Hsv::new(60, 255, 255));
/// ```
pub fn rgb_to_hsv(rgb: [u8; 3]) -> Hsv {
    let [r, g, b] = rgb.map(i32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v == 0 {
        0
    } else {
        ((diff * 255) as f32 / v as f32).round() as i32
    };

    let h = if diff == 0 {
        0
    } else {
        // Position inside the six 60-degree sectors, in units of `diff`
        let x = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let mut h = (x as f32 * 30.0 / diff as f32 + 0.5).floor() as i32;
        if h < 0 {
            h += HUE_RANGE as i32;
        }
        if h >= HUE_RANGE as i32 {
            h -= HUE_RANGE as i32;
        }
        h
    };

    Hsv::new(h as u8, s as u8, v as u8)
}

/// Convert HSV back to `[r, g, b]`.
///
/// Hue values at or above [`HUE_RANGE`] wrap around.
pub fn hsv_to_rgb(hsv: Hsv) -> [u8; 3] {
    let v = hsv.v as f32 / 255.0;
    let s = hsv.s as f32 / 255.0;

    if hsv.s == 0 {
        let g = super::clamp_u8(v * 255.0);
        return [g, g, g];
    }

    let h = (hsv.h % HUE_RANGE) as f32 * 6.0 / HUE_RANGE as f32;
    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [
        super::clamp_u8(r * 255.0),
        super::clamp_u8(g * 255.0),
        super::clamp_u8(b * 255.0),
    ]
}
