//! Threshold and segmentation: every step here turns the buffer into a
//! single-channel 0/255 mask.

use super::kernel::{self, Border};
use crate::api::PipelineError;
use crate::buffer::{Layout, PixelBuffer};
use crate::color::{clamp_u8, rgb_to_hsv, to_luminance};

/// Window edge of the adaptive threshold neighbourhood.
pub const ADAPTIVE_BLOCK: usize = 11;

/// Minimum saturation and value for a pixel to count in the hue mask.
pub const MASK_MIN_SATURATION: u8 = 100;
pub const MASK_MIN_VALUE: u8 = 100;

const ON: u8 = 255;
const OFF: u8 = 0;

fn mask(buffer: &PixelBuffer, samples: Vec<u8>) -> PixelBuffer {
    buffer.with_samples(Layout::Gray, samples)
}

/// Binarize luminance at a fixed cutoff: `v >= cutoff` is set.
pub fn global(buffer: PixelBuffer, cutoff: u8) -> PixelBuffer {
    let samples = to_luminance(&buffer)
        .into_iter()
        .map(|v| if v >= cutoff { ON } else { OFF })
        .collect();
    mask(&buffer, samples)
}

/// Binarize luminance against a Gaussian-weighted local mean minus `offset`.
///
/// The mean is taken over an [`ADAPTIVE_BLOCK`]-wide window with replicated
/// borders; a pixel is set when `v > mean - offset`.
pub fn adaptive(buffer: PixelBuffer, offset: i32) -> PixelBuffer {
    let luma = to_luminance(&buffer);
    let weights = kernel::gaussian_kernel(ADAPTIVE_BLOCK);
    let means = kernel::convolve_separable(
        &luma,
        buffer.width(),
        buffer.height(),
        1,
        &weights,
        Border::Replicate,
    );
    let samples = luma
        .iter()
        .zip(means)
        .map(|(&v, mean)| {
            let cutoff = clamp_u8(mean) as i32 - offset;
            if v as i32 > cutoff {
                ON
            } else {
                OFF
            }
        })
        .collect();
    mask(&buffer, samples)
}

/// Cutoff maximizing between-class variance of a luminance histogram.
///
/// When several splits reach the same variance (an empty gap between two
/// clusters) the cutoff sits in the middle of that run. A histogram with a
/// single occupied bin has no split and yields 1, so every non-zero sample
/// is set.
pub fn otsu_cutoff(luma: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &v in luma {
        histogram[v as usize] += 1;
    }

    let total = luma.len() as f64;
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &n)| i as f64 * n as f64)
        .sum();

    let mut weight_low = 0.0;
    let mut sum_low = 0.0;
    let mut best = f64::NEG_INFINITY;
    let mut plateau: Option<(usize, usize)> = None;

    for (t, &count) in histogram.iter().enumerate() {
        weight_low += count as f64;
        sum_low += t as f64 * count as f64;
        if weight_low == 0.0 {
            continue;
        }
        let weight_high = total - weight_low;
        if weight_high == 0.0 {
            break;
        }

        let mean_low = sum_low / weight_low;
        let mean_high = (sum_all - sum_low) / weight_high;
        let variance = weight_low * weight_high * (mean_low - mean_high).powi(2);

        if variance > best {
            best = variance;
            plateau = Some((t, t));
        } else if variance == best {
            if let Some((first, last)) = plateau {
                if last + 1 == t {
                    plateau = Some((first, t));
                }
            }
        }
    }

    match plateau {
        Some((first, last)) => ((first + last) / 2 + 1) as u8,
        None => 1,
    }
}

/// Binarize luminance at the automatically selected Otsu cutoff.
pub fn otsu(buffer: PixelBuffer) -> PixelBuffer {
    let luma = to_luminance(&buffer);
    let cutoff = otsu_cutoff(&luma);
    tracing::debug!(cutoff, "Otsu cutoff selected");
    let samples = luma
        .into_iter()
        .map(|v| if v >= cutoff { ON } else { OFF })
        .collect();
    mask(&buffer, samples)
}

/// Select saturated, bright pixels whose hue lies in `lower..=upper`.
///
/// # Errors
///
/// [`PipelineError::InvalidChannelShape`] for single-channel buffers.
pub fn hue_mask(buffer: PixelBuffer, lower: u8, upper: u8) -> Result<PixelBuffer, PipelineError> {
    buffer.require_color("hue mask")?;

    let layout = buffer.layout();
    let samples = buffer
        .samples()
        .chunks_exact(3)
        .map(|px| {
            let hsv = rgb_to_hsv(layout.to_rgb(px));
            let selected = (lower..=upper).contains(&hsv.h)
                && hsv.s >= MASK_MIN_SATURATION
                && hsv.v >= MASK_MIN_VALUE;
            if selected {
                ON
            } else {
                OFF
            }
        })
        .collect();
    Ok(mask(&buffer, samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_cutoff_is_inclusive() {
        let buffer = PixelBuffer::from_gray(3, 1, vec![127, 128, 129]).unwrap();
        let out = global(buffer, 128);
        assert_eq!(out.layout(), Layout::Gray);
        assert_eq!(out.samples(), &[0, 255, 255]);
    }

    #[test]
    fn test_global_uses_luminance() {
        // Pure blue has luminance 29
        let buffer = PixelBuffer::from_rgb(1, 1, vec![0, 0, 255]).unwrap();
        assert_eq!(global(buffer.clone(), 29).samples(), &[255]);
        assert_eq!(global(buffer, 30).samples(), &[0]);
    }

    #[test]
    fn test_otsu_splits_bimodal_histogram() {
        let mut luma = vec![30u8; 50];
        luma.extend(vec![220u8; 50]);
        let cutoff = otsu_cutoff(&luma);
        assert!(cutoff > 30 && cutoff <= 220, "cutoff {cutoff}");
        assert_eq!(cutoff, 125);
    }

    #[test]
    fn test_otsu_single_level() {
        assert_eq!(otsu_cutoff(&[77; 10]), 1);
        let buffer = PixelBuffer::from_gray(2, 1, vec![0, 0]).unwrap();
        assert_eq!(otsu(buffer).samples(), &[0, 0]);
    }

    #[test]
    fn test_adaptive_flat_region() {
        let buffer = PixelBuffer::from_gray(4, 4, vec![100; 16]).unwrap();
        // v > 100 - 5 everywhere
        assert!(adaptive(buffer.clone(), 5).samples().iter().all(|&v| v == 255));
        // v > 100 + 5 nowhere
        assert!(adaptive(buffer, -5).samples().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_adaptive_finds_local_edge() {
        // A dark dot on a bright field stays dark, the field turns white
        let mut samples = vec![200u8; 15 * 15];
        samples[7 * 15 + 7] = 20;
        let buffer = PixelBuffer::from_gray(15, 15, samples).unwrap();
        let out = adaptive(buffer, 2);
        assert_eq!(out.pixel(7, 7), &[0]);
        assert_eq!(out.pixel(0, 0), &[255]);
    }

    #[test]
    fn test_hue_mask_selects_red() {
        let buffer = PixelBuffer::from_rgb(
            4,
            1,
            vec![
                255, 0, 0, // red
                0, 0, 255, // blue
                255, 180, 180, // pale red, low saturation
                60, 0, 0, // dark red, low value
            ],
        )
        .unwrap();
        let out = hue_mask(buffer, 0, 10).unwrap();
        assert_eq!(out.samples(), &[255, 0, 0, 0]);
    }

    #[test]
    fn test_hue_mask_rejects_gray() {
        let buffer = PixelBuffer::from_gray(1, 1, vec![255]).unwrap();
        assert!(matches!(
            hue_mask(buffer, 0, 10),
            Err(PipelineError::InvalidChannelShape { operation: "hue mask", .. })
        ));
    }
}
