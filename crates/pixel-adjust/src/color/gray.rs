//! Color → intensity weighting.

use crate::buffer::PixelBuffer;

const SHIFT: u32 = 14;
const R_WEIGHT: u32 = 4899; // 0.299 * 2^14
const G_WEIGHT: u32 = 9617; // 0.587 * 2^14
const B_WEIGHT: u32 = 1868; // 0.114 * 2^14

/// Luminance of one pixel given as `[r, g, b]`.
#[inline]
pub fn luminance(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb;
    let y = r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT;
    ((y + (1 << (SHIFT - 1))) >> SHIFT) as u8
}

/// Flatten a buffer to one luminance sample per pixel.
///
/// Single-channel buffers are returned as a copy of their samples.
pub fn to_luminance(buffer: &PixelBuffer) -> Vec<u8> {
    let layout = buffer.layout();
    if !layout.is_color() {
        return buffer.samples().to_vec();
    }
    buffer
        .samples()
        .chunks_exact(3)
        .map(|px| luminance(layout.to_rgb(px)))
        .collect()
}
