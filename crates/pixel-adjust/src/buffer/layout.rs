//! Channel layout of a [`PixelBuffer`](super::PixelBuffer).

use std::fmt;

/// How the samples of one pixel are arranged.
///
/// Three-channel buffers carry their channel order explicitly so that every
/// color-space conversion reads the right sample as red and blue. Nothing in
/// the pipeline guesses the order from context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// One intensity sample per pixel.
    Gray,
    /// Three samples per pixel: red, green, blue.
    Rgb,
    /// Three samples per pixel: blue, green, red.
    Bgr,
}

impl Layout {
    /// Number of samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            Layout::Gray => 1,
            Layout::Rgb | Layout::Bgr => 3,
        }
    }

    /// Whether this layout carries three color channels.
    #[inline]
    pub fn is_color(self) -> bool {
        self.channels() == 3
    }

    /// Read a three-sample pixel as `[r, g, b]`.
    ///
    /// Gray layouts broadcast the single sample.
    #[inline]
    pub fn to_rgb(self, px: &[u8]) -> [u8; 3] {
        match self {
            Layout::Gray => [px[0], px[0], px[0]],
            Layout::Rgb => [px[0], px[1], px[2]],
            Layout::Bgr => [px[2], px[1], px[0]],
        }
    }

    /// Write `[r, g, b]` into a three-sample pixel in this layout's order.
    #[inline]
    pub fn write_rgb(self, px: &mut [u8], rgb: [u8; 3]) {
        match self {
            Layout::Rgb => px.copy_from_slice(&rgb),
            Layout::Bgr => {
                px[0] = rgb[2];
                px[1] = rgb[1];
                px[2] = rgb[0];
            }
            Layout::Gray => px[0] = rgb[0],
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Gray => write!(f, "single-channel"),
            Layout::Rgb => write!(f, "RGB"),
            Layout::Bgr => write!(f, "BGR"),
        }
    }
}
