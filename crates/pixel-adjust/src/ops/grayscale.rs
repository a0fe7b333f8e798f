//! Grayscale normalizer: collapse color to luminance, keep three channels.

use crate::buffer::{Layout, PixelBuffer};
use crate::color::to_luminance;

/// Replace every pixel by its luminance broadcast to three equal channels.
///
/// Three-channel buffers keep their channel order; a single-channel buffer
/// is expanded to RGB so later color stages can run.
pub fn grayscale(buffer: PixelBuffer) -> PixelBuffer {
    let luma = to_luminance(&buffer);
    let layout = match buffer.layout() {
        Layout::Gray => Layout::Rgb,
        order => order,
    };
    let samples = luma.iter().flat_map(|&y| [y, y, y]).collect();
    buffer.with_samples(layout, samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_become_equal() {
        let buffer = PixelBuffer::from_rgb(2, 1, vec![255, 0, 0, 10, 200, 30]).unwrap();
        let out = grayscale(buffer);
        assert_eq!(out.layout(), Layout::Rgb);
        for px in out.samples().chunks_exact(3) {
            assert!(px[0] == px[1] && px[1] == px[2]);
        }
        assert_eq!(out.pixel(0, 0), &[76, 76, 76]);
    }

    #[test]
    fn test_order_is_kept() {
        let buffer = PixelBuffer::from_rgb(1, 1, vec![0, 0, 255])
            .unwrap()
            .to_order(Layout::Bgr);
        let out = grayscale(buffer);
        assert_eq!(out.layout(), Layout::Bgr);
        assert_eq!(out.samples(), &[29, 29, 29]);
    }

    #[test]
    fn test_gray_input_is_expanded() {
        let buffer = PixelBuffer::from_gray(2, 1, vec![5, 250]).unwrap();
        let out = grayscale(buffer);
        assert_eq!(out.layout(), Layout::Rgb);
        assert_eq!(out.samples(), &[5, 5, 5, 250, 250, 250]);
    }

    #[test]
    fn test_idempotent() {
        let buffer = PixelBuffer::from_rgb(2, 1, vec![12, 200, 99, 1, 2, 3]).unwrap();
        let once = grayscale(buffer);
        let twice = grayscale(once.clone());
        assert_eq!(once, twice);
    }
}
