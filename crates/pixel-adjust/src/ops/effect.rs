//! Effect adjuster: sharpness, definition, blur and brilliance.

use super::kernel::{self, Border};
use super::tonal;
use crate::api::PipelineError;
use crate::buffer::PixelBuffer;
use crate::color::clamp_u8;

/// Blend between a smoothed copy and the original.
///
/// `factor = 0` yields the smoothed image, `1` the original, and values
/// above 1 extrapolate away from the smoothed image (sharpening).
pub fn sharpness(mut buffer: PixelBuffer, factor: f32) -> PixelBuffer {
    let (w, h, c) = (buffer.width(), buffer.height(), buffer.channels());
    let smoothed = kernel::smooth(buffer.samples(), w, h, c);
    for (v, s) in buffer.samples_mut().iter_mut().zip(smoothed) {
        let s = s as f32;
        *v = clamp_u8(s + factor * (*v as f32 - s));
    }
    buffer
}

/// Sharpness followed by contrast at the same factor.
pub fn definition(buffer: PixelBuffer, factor: f32) -> PixelBuffer {
    tonal::contrast(sharpness(buffer, factor), factor)
}

/// Largest accepted blur radius (a 511-tap kernel).
pub const MAX_BLUR_RADIUS: u32 = 255;

/// Gaussian blur with a `2 * radius + 1` aperture and reflected borders.
///
/// A radius of 0 returns the buffer untouched. Callers are expected to
/// stay within [`MAX_BLUR_RADIUS`]; [`Operation::apply`](super::Operation::apply)
/// and [`AdjustOptions::validate`](crate::AdjustOptions::validate) reject larger radii.
pub fn blur(mut buffer: PixelBuffer, radius: u32) -> PixelBuffer {
    if radius == 0 {
        return buffer;
    }
    let size = 2 * radius as usize + 1;
    let weights = kernel::gaussian_kernel(size);
    let (w, h, c) = (buffer.width(), buffer.height(), buffer.channels());
    let blurred = kernel::convolve_separable(buffer.samples(), w, h, c, &weights, Border::Reflect101);
    for (v, b) in buffer.samples_mut().iter_mut().zip(blurred) {
        *v = clamp_u8(b);
    }
    buffer
}

/// Brightness followed by contrast at the same factor.
///
/// # Errors
///
/// [`PipelineError::InvalidParameter`] if `factor` is not positive.
pub fn brilliance(buffer: PixelBuffer, factor: f32) -> Result<PixelBuffer, PipelineError> {
    let brightened = tonal::brightness(buffer, factor).map_err(|_| {
        PipelineError::invalid("brilliance", factor.to_string(), "must be greater than zero")
    })?;
    Ok(tonal::contrast(brightened, factor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> PixelBuffer {
        let samples = (0..width * height).map(|i| ((i * 37) % 256) as u8).collect();
        PixelBuffer::from_gray(width, height, samples).unwrap()
    }

    #[test]
    fn test_sharpness_one_is_identity() {
        let buffer = ramp(6, 5);
        assert_eq!(sharpness(buffer.clone(), 1.0), buffer);
    }

    #[test]
    fn test_sharpness_zero_smooths() {
        let buffer = ramp(6, 5);
        let smoothed = kernel::smooth(buffer.samples(), 6, 5, 1);
        assert_eq!(sharpness(buffer, 0.0).samples(), smoothed.as_slice());
    }

    #[test]
    fn test_sharpness_boosts_peak() {
        #[rustfmt::skip]
        let samples = vec![
            100, 100, 100,
            100, 200, 100,
            100, 100, 100,
        ];
        let buffer = PixelBuffer::from_gray(3, 3, samples).unwrap();
        let out = sharpness(buffer, 2.0);
        assert!(out.pixel(1, 1)[0] > 200);
        assert!(out.pixel(0, 1)[0] < 100);
    }

    #[test]
    fn test_blur_zero_is_identity() {
        let buffer = ramp(7, 4);
        assert_eq!(blur(buffer.clone(), 0), buffer);
    }

    #[test]
    fn test_blur_keeps_flat_image() {
        let buffer = PixelBuffer::from_rgb(5, 5, vec![90; 75]).unwrap();
        assert_eq!(blur(buffer.clone(), 3), buffer);
    }

    #[test]
    fn test_blur_on_single_pixel() {
        let buffer = PixelBuffer::from_rgb(1, 1, vec![1, 2, 3]).unwrap();
        assert_eq!(blur(buffer.clone(), 5), buffer);
    }

    #[test]
    fn test_definition_matches_composition() {
        let buffer = ramp(5, 5);
        let expected = tonal::contrast(sharpness(buffer.clone(), 1.4), 1.4);
        assert_eq!(definition(buffer, 1.4), expected);
    }

    #[test]
    fn test_brilliance_matches_composition() {
        let buffer = ramp(5, 5);
        let expected = tonal::contrast(tonal::brightness(buffer.clone(), 1.2).unwrap(), 1.2);
        assert_eq!(brilliance(buffer, 1.2).unwrap(), expected);
    }

    #[test]
    fn test_brilliance_rejects_zero() {
        let err = brilliance(ramp(2, 2), 0.0).unwrap_err();
        assert_eq!(err.parameter(), Some("brilliance"));
    }
}
