//! 8-bit CIELAB encoding used by the array export.

/// D65 reference white, X and Z components (Y is 1.0).
const WHITE_X: f32 = 0.950_456;
const WHITE_Z: f32 = 1.088_754;

/// CIE epsilon: below this, the cube-root branch is replaced by a line.
const EPSILON: f32 = 0.008_856;

#[inline]
fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Convert `[r, g, b]` (sRGB) to 8-bit `[L, a, b]`.
///
/// `L` is scaled from `0..=100` to `0..=255`; `a` and `b` are offset by 128.
///
/// ```
/// use pixel_adjust::color::rgb_to_lab;
///
/// assert_eq!(rgb_to_lab([0, 0, 0]), [0, 128, 128]);
/// assert_eq!(rgb_to_lab([255, 255, 255]), [255, 128, 128]);
/// ```
pub fn rgb_to_lab(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(srgb_to_linear);

    let x = (0.412_453 * r + 0.357_580 * g + 0.180_423 * b) / WHITE_X;
    let y = 0.212_671 * r + 0.715_160 * g + 0.072_169 * b;
    let z = (0.019_334 * r + 0.119_193 * g + 0.950_227 * b) / WHITE_Z;

    let (fx, fy, fz) = (f(x), f(y), f(z));
    let l = if y > EPSILON {
        116.0 * fy - 16.0
    } else {
        903.3 * y
    };

    [
        super::clamp_u8(l * 255.0 / 100.0),
        super::clamp_u8(500.0 * (fx - fy) + 128.0),
        super::clamp_u8(200.0 * (fy - fz) + 128.0),
    ]
}
