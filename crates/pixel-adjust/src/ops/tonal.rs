//! Tonal adjuster: brightness, contrast, exposure, shadows and highlights.
//!
//! Brightness, contrast, exposure and highlights act on every sample
//! independently and accept any layout. Shadows works in HSV and needs
//! three channels.

use crate::api::PipelineError;
use crate::buffer::PixelBuffer;
use crate::color::{clamp_u8, hsv_to_rgb, rgb_to_hsv, Hsv};

/// Pixels with V below this (8-bit scale) are shadows.
pub const SHADOW_CUTOFF: u8 = 80;

/// Normalized samples above this are highlights.
pub const HIGHLIGHT_CUTOFF: f32 = 0.7;

/// Contrast pivot.
pub const MIDPOINT: f32 = 128.0;

/// Apply `f` to every sample through a 256-entry lookup table.
fn map_samples(mut buffer: PixelBuffer, f: impl Fn(u8) -> u8) -> PixelBuffer {
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = f(i as u8);
    }
    for v in buffer.samples_mut() {
        *v = lut[*v as usize];
    }
    buffer
}

/// Inverse-gamma curve `255 * (v / 255) ^ (1 / factor)`.
///
/// # Errors
///
/// [`PipelineError::InvalidParameter`] if `factor` is not positive.
pub fn brightness(buffer: PixelBuffer, factor: f32) -> Result<PixelBuffer, PipelineError> {
    if !(factor > 0.0) {
        return Err(PipelineError::invalid(
            "brightness",
            factor.to_string(),
            "must be greater than zero",
        ));
    }
    let exponent = 1.0 / factor;
    Ok(map_samples(buffer, |v| {
        clamp_u8(255.0 * (v as f32 / 255.0).powf(exponent))
    }))
}

/// Stretch samples away from (or toward) the midpoint.
pub fn contrast(buffer: PixelBuffer, factor: f32) -> PixelBuffer {
    map_samples(buffer, |v| clamp_u8(MIDPOINT + factor * (v as f32 - MIDPOINT)))
}

/// Linear gain.
pub fn exposure(buffer: PixelBuffer, factor: f32) -> PixelBuffer {
    map_samples(buffer, |v| clamp_u8(v as f32 * factor))
}

/// Scale V of shadow pixels only.
///
/// Only pixels inside the shadow mask are converted back from HSV; every
/// other pixel keeps its samples.
pub fn shadows(mut buffer: PixelBuffer, factor: f32) -> Result<PixelBuffer, PipelineError> {
    buffer.require_color("shadows")?;

    let layout = buffer.layout();
    for px in buffer.samples_mut().chunks_exact_mut(3) {
        let hsv = rgb_to_hsv(layout.to_rgb(px));
        if hsv.v >= SHADOW_CUTOFF {
            continue;
        }
        let v = clamp_u8(hsv.v as f32 * factor);
        if v != hsv.v {
            layout.write_rgb(px, hsv_to_rgb(Hsv::new(hsv.h, hsv.s, v)));
        }
    }
    Ok(buffer)
}

/// Scale bright samples, capping them at full intensity.
pub fn highlights(buffer: PixelBuffer, factor: f32) -> PixelBuffer {
    map_samples(buffer, |v| {
        let n = v as f32 / 255.0;
        if n > HIGHLIGHT_CUTOFF {
            clamp_u8((n * factor).min(1.0) * 255.0)
        } else {
            v
        }
    })
}
