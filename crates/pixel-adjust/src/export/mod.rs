//! Conversion of a processed buffer into a plain-text sample array.
//!
//! The text form is a one-line shape header followed by one line per image
//! row, every sample of that row comma-separated:
//!
//! ```text
//! # Shape: 2x2x3
//! 255,0,0,0,255,0
//! 0,0,255,255,255,255
//! ```

use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::api::PipelineError;
use crate::buffer::{Layout, PixelBuffer};
use crate::color::{rgb_to_hsv, rgb_to_lab};

/// Representation of the exported samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// Samples as stored, three-channel buffers in RGB order.
    #[default]
    Rgb,
    /// 8-bit HSV with hue in `0..=179`.
    Hsv,
    /// 8-bit CIELAB.
    Lab,
}

impl ColorSpace {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::Hsv => "hsv",
            ColorSpace::Lab => "lab",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorSpace {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorSpace::Rgb),
            "hsv" => Ok(ColorSpace::Hsv),
            "lab" => Ok(ColorSpace::Lab),
            _ => Err(PipelineError::invalid(
                "colorspace",
                s,
                "expected one of rgb, hsv, lab",
            )),
        }
    }
}

/// Samples of a processed image in a chosen [`ColorSpace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelArray {
    width: usize,
    height: usize,
    channels: usize,
    colorspace: ColorSpace,
    samples: Vec<u8>,
}

impl ChannelArray {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Render as the shape header plus comma-separated rows.
    pub fn to_text(&self) -> String {
        let row_len = self.width * self.channels;
        // Up to four bytes per sample ("255,"), plus the header
        let mut out = String::with_capacity(self.samples.len() * 4 + 32);
        let _ = writeln!(
            out,
            "# Shape: {}x{}x{}",
            self.height, self.width, self.channels
        );
        for row in self.samples.chunks_exact(row_len) {
            for (i, v) in row.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{v}");
            }
            out.push('\n');
        }
        out
    }
}

/// Convert a processed buffer into `colorspace`.
///
/// RGB passes samples through (three-channel buffers are reordered to RGB).
/// HSV and LAB need three channels; a single-channel mask cannot be
/// converted.
///
/// ```
/// use pixel_adjust::{convert, ColorSpace, PixelBuffer};
///
/// let buffer = PixelBuffer::from_rgb(1, 1, vec![255, 0, 0]).unwrap();
/// let hsv = convert(&buffer, ColorSpace::Hsv).unwrap();
/// assert_eq!(hsv.samples(), &[0, 255, 255]);
/// assert_eq!(hsv.to_text(), "# Shape: 1x1x3\n0,255,255\n");
/// ```
pub fn convert(buffer: &PixelBuffer, colorspace: ColorSpace) -> Result<ChannelArray, PipelineError> {
    let layout = buffer.layout();
    let samples = match colorspace {
        ColorSpace::Rgb if layout == Layout::Bgr => {
            buffer.clone().to_order(Layout::Rgb).into_samples()
        }
        ColorSpace::Rgb => buffer.samples().to_vec(),
        ColorSpace::Hsv => {
            buffer.require_color("hsv export")?;
            buffer
                .samples()
                .chunks_exact(3)
                .flat_map(|px| {
                    let hsv = rgb_to_hsv(layout.to_rgb(px));
                    [hsv.h, hsv.s, hsv.v]
                })
                .collect()
        }
        ColorSpace::Lab => {
            buffer.require_color("lab export")?;
            buffer
                .samples()
                .chunks_exact(3)
                .flat_map(|px| rgb_to_lab(layout.to_rgb(px)))
                .collect()
        }
    };

    tracing::debug!(
        colorspace = %colorspace,
        width = buffer.width(),
        height = buffer.height(),
        "Converted buffer for export"
    );

    Ok(ChannelArray {
        width: buffer.width(),
        height: buffer.height(),
        channels: buffer.channels(),
        colorspace,
        samples,
    })
}
