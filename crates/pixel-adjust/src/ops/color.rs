//! Color adjuster: hue rotation, saturation and vibrance in one HSV pass.

use crate::api::PipelineError;
use crate::buffer::PixelBuffer;
use crate::color::{clamp_u8, hsv_to_rgb, rgb_to_hsv, Hsv, HUE_RANGE};

/// Saturation below which vibrance applies.
pub const VIBRANCE_CUTOFF: u8 = 128;

/// Combined parameters of the color stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorShift {
    /// Hue rotation in half-degrees.
    pub hue: i32,
    /// Saturation multiplier.
    pub saturation: f32,
    /// Saturation multiplier for weakly saturated pixels.
    pub vibrance: f32,
}

impl ColorShift {
    /// Whether this shift leaves every pixel untouched.
    pub fn is_neutral(&self) -> bool {
        self.hue.rem_euclid(HUE_RANGE as i32) == 0
            && self.saturation == 1.0
            && self.vibrance == 1.0
    }

    /// Apply the shift to one HSV pixel.
    ///
    /// Vibrance looks at the saturation after the saturation step.
    #[inline]
    pub fn shift(&self, hsv: Hsv) -> Hsv {
        let range = HUE_RANGE as i32;
        let h = (hsv.h as i32 + self.hue.rem_euclid(range)).rem_euclid(range) as u8;
        let mut s = hsv.s;
        if self.saturation != 1.0 {
            s = clamp_u8(s as f32 * self.saturation);
        }
        if self.vibrance != 1.0 && s < VIBRANCE_CUTOFF {
            s = clamp_u8(s as f32 * self.vibrance);
        }
        Hsv::new(h, s, hsv.v)
    }
}

/// Rotate hue and scale saturation of a three-channel buffer.
///
/// Pixels whose HSV triple comes out unchanged keep their original samples,
/// so the 8-bit HSV round trip never disturbs them.
///
/// # Errors
///
/// [`PipelineError::InvalidChannelShape`] for single-channel buffers.
pub fn adjust_color(mut buffer: PixelBuffer, shift: ColorShift) -> Result<PixelBuffer, PipelineError> {
    if shift.is_neutral() {
        return Ok(buffer);
    }
    buffer.require_color("color adjustment")?;

    let layout = buffer.layout();
    for px in buffer.samples_mut().chunks_exact_mut(3) {
        let hsv = rgb_to_hsv(layout.to_rgb(px));
        let shifted = shift.shift(hsv);
        if shifted != hsv {
            layout.write_rgb(px, hsv_to_rgb(shifted));
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Layout;

    fn shift(hue: i32, saturation: f32, vibrance: f32) -> ColorShift {
        ColorShift {
            hue,
            saturation,
            vibrance,
        }
    }

    #[test]
    fn test_neutral_detection() {
        assert!(shift(0, 1.0, 1.0).is_neutral());
        assert!(shift(180, 1.0, 1.0).is_neutral());
        assert!(!shift(1, 1.0, 1.0).is_neutral());
        assert!(!shift(0, 1.01, 1.0).is_neutral());
    }

    #[test]
    fn test_hue_wraps() {
        let s = shift(30, 1.0, 1.0);
        assert_eq!(s.shift(Hsv::new(170, 200, 200)).h, 20);
        let s = shift(-30, 1.0, 1.0);
        assert_eq!(s.shift(Hsv::new(10, 200, 200)).h, 160);
    }

    #[test]
    fn test_extreme_hue_shifts_reduce_mod_range() {
        // i32::MAX = 127 (mod 180), i32::MIN = 52 (mod 180)
        let s = shift(i32::MAX, 1.0, 1.0);
        assert_eq!(s.shift(Hsv::new(10, 200, 200)).h, 137);
        let s = shift(i32::MIN, 1.0, 1.0);
        assert_eq!(s.shift(Hsv::new(10, 200, 200)).h, 62);
        assert_eq!(s.shift(Hsv::new(179, 200, 200)).h, 51);
    }

    #[test]
    fn test_vibrance_only_touches_weak_saturation() {
        let s = shift(0, 1.0, 2.0);
        assert_eq!(s.shift(Hsv::new(0, 50, 200)).s, 100);
        assert_eq!(s.shift(Hsv::new(0, 200, 200)).s, 200);
        assert_eq!(s.shift(Hsv::new(0, 127, 200)).s, 254);
        assert_eq!(s.shift(Hsv::new(0, 128, 200)).s, 128);
    }

    #[test]
    fn test_vibrance_follows_saturation() {
        // 100 * 1.5 = 150 is no longer below the cutoff
        let s = shift(0, 1.5, 2.0);
        assert_eq!(s.shift(Hsv::new(0, 100, 200)).s, 150);
    }

    #[test]
    fn test_red_rotates_to_green() {
        let buffer = PixelBuffer::from_rgb(1, 1, vec![255, 0, 0]).unwrap();
        let out = adjust_color(buffer, shift(60, 1.0, 1.0)).unwrap();
        assert_eq!(out.samples(), &[0, 255, 0]);
    }

    #[test]
    fn test_bgr_buffer_rotates_same_color() {
        let buffer = PixelBuffer::from_rgb(1, 1, vec![255, 0, 0])
            .unwrap()
            .to_order(Layout::Bgr);
        let out = adjust_color(buffer, shift(60, 1.0, 1.0)).unwrap();
        assert_eq!(out.layout(), Layout::Bgr);
        assert_eq!(out.to_order(Layout::Rgb).samples(), &[0, 255, 0]);
    }

    #[test]
    fn test_zero_saturation_desaturates() {
        let buffer = PixelBuffer::from_rgb(1, 1, vec![200, 40, 40]).unwrap();
        let out = adjust_color(buffer, shift(0, 0.0, 1.0)).unwrap();
        assert_eq!(out.samples(), &[200, 200, 200]);
    }

    #[test]
    fn test_unchanged_pixels_keep_samples() {
        // Gray pixels have no saturation to scale
        let samples = vec![13, 13, 13, 201, 201, 201];
        let buffer = PixelBuffer::from_rgb(2, 1, samples.clone()).unwrap();
        let out = adjust_color(buffer, shift(0, 1.7, 1.0)).unwrap();
        assert_eq!(out.samples(), samples.as_slice());
    }

    #[test]
    fn test_rejects_gray_buffer() {
        let buffer = PixelBuffer::from_gray(1, 1, vec![0]).unwrap();
        let err = adjust_color(buffer, shift(10, 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidChannelShape { .. }));
    }
}
