//! Convolution kernels and border handling shared by the effect and
//! threshold stages.
//!
//! All filters operate per channel on interleaved 8-bit samples and
//! accumulate in `f32`. Callers decide how to round the result.

/// How samples outside the image are synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Border {
    /// Mirror without repeating the edge sample: `dcb|abcd|cba`.
    Reflect101,
    /// Repeat the edge sample: `aaa|abcd|ddd`.
    Replicate,
}

impl Border {
    /// Map a possibly out-of-range index into `0..len`.
    #[inline]
    pub(crate) fn index(self, idx: isize, len: usize) -> usize {
        debug_assert!(len > 0);
        let last = len as isize - 1;
        match self {
            Border::Replicate => idx.clamp(0, last) as usize,
            Border::Reflect101 => {
                if last == 0 {
                    return 0;
                }
                // Reflection is periodic with period 2 * (len - 1), which
                // also covers radii wider than the image.
                let period = 2 * last;
                let i = idx.rem_euclid(period);
                (if i > last { period - i } else { i }) as usize
            }
        }
    }
}

/// Fixed binomial kernels used for small apertures.
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.031_25, 0.109_375, 0.218_75, 0.281_25, 0.218_75, 0.109_375, 0.031_25,
    ],
];

/// Sigma implied by an aperture of `size` taps.
#[inline]
pub(crate) fn sigma_for(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian of odd length `size`.
///
/// Apertures up to 7 taps use fixed binomial weights; larger apertures are
/// sampled from a Gaussian with [`sigma_for`] and normalized to sum 1.
pub(crate) fn gaussian_kernel(size: usize) -> Vec<f32> {
    debug_assert!(size % 2 == 1, "kernel size must be odd");
    if size <= 7 {
        return SMALL_KERNELS[size / 2].to_vec();
    }

    let sigma = sigma_for(size);
    let center = (size / 2) as f32;
    let scale = -0.5 / (sigma * sigma);
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (scale * d * d).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Apply a symmetric 1-D kernel horizontally then vertically.
pub(crate) fn convolve_separable(
    samples: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    border: Border,
) -> Vec<f32> {
    let radius = (kernel.len() / 2) as isize;
    let stride = width * channels;

    let mut horizontal = vec![0.0f32; samples.len()];
    for y in 0..height {
        let row = &samples[y * stride..(y + 1) * stride];
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0;
                for (k, w) in kernel.iter().enumerate() {
                    let sx = border.index(x as isize + k as isize - radius, width);
                    acc += w * row[sx * channels + c] as f32;
                }
                horizontal[y * stride + x * channels + c] = acc;
            }
        }
    }

    let mut out = vec![0.0f32; samples.len()];
    for y in 0..height {
        for (k, w) in kernel.iter().enumerate() {
            let sy = border.index(y as isize + k as isize - radius, height);
            let src = &horizontal[sy * stride..(sy + 1) * stride];
            let dst = &mut out[y * stride..(y + 1) * stride];
            for (d, s) in dst.iter_mut().zip(src) {
                *d += w * s;
            }
        }
    }
    out
}

/// 3x3 smoothing filter `[1 1 1; 1 5 1; 1 1 1] / 13` with reflect-101
/// borders, rounded back to 8 bits.
pub(crate) fn smooth(samples: &[u8], width: usize, height: usize, channels: usize) -> Vec<u8> {
    const WEIGHTS: [[f32; 3]; 3] = [[1.0, 1.0, 1.0], [1.0, 5.0, 1.0], [1.0, 1.0, 1.0]];
    const NORM: f32 = 13.0;

    let border = Border::Reflect101;
    let mut out = vec![0u8; samples.len()];
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0;
                for (dy, row) in WEIGHTS.iter().enumerate() {
                    let sy = border.index(y as isize + dy as isize - 1, height);
                    for (dx, w) in row.iter().enumerate() {
                        let sx = border.index(x as isize + dx as isize - 1, width);
                        acc += w * samples[(sy * width + sx) * channels + c] as f32;
                    }
                }
                out[(y * width + x) * channels + c] = crate::color::clamp_u8(acc / NORM);
            }
        }
    }
    out
}
