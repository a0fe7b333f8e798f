//! Per-pixel color-space conversions shared by every stage.
//!
//! All conversions work on 8-bit samples and use the encodings the rest of
//! the pipeline expects:
//!
//! - **Luminance**: `Y = 0.299 R + 0.587 G + 0.114 B` in 14-bit fixed point
//! - **HSV**: hue on a half-circle `0..=179` (degrees / 2), saturation and
//!   value on `0..=255`
//! - **CIELAB**: D65 white point, `L` scaled to `0..=255`, `a`/`b` offset by 128
//!
//! Channel order is never implied: every conversion takes `[r, g, b]` and
//! callers read pixels through [`Layout::to_rgb`](crate::Layout::to_rgb).

mod gray;
mod hsv;
mod lab;

pub use gray::{luminance, to_luminance};
pub use hsv::{hsv_to_rgb, rgb_to_hsv, Hsv, HUE_RANGE};
pub use lab::rgb_to_lab;

/// Round a float sample half away from zero and clamp it to `0..=255`.
///
/// NaN maps to 0.
#[inline]
pub fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
