//! Owned 8-bit raster passed between pipeline stages.

use super::Layout;
use crate::api::PipelineError;

/// An owned, row-major raster of unsigned 8-bit samples.
///
/// A buffer is either single-channel (`height × width`) or three-channel
/// (`height × width × 3`) with an explicit [`Layout`]. Every stage takes the
/// buffer by value and hands back a new one, so a buffer is never shared
/// between stages or between concurrent invocations.
///
/// Because samples are `u8`, a buffer can only ever hold integers in
/// `0..=255`; stages doing float math clamp and round before storing.
///
/// # Example
///
/// ```
/// use pixel_adjust::{Layout, PixelBuffer};
///
/// let buffer = PixelBuffer::from_rgb(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(buffer.layout(), Layout::Rgb);
/// assert_eq!(buffer.pixel(1, 0), &[0, 0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    samples: Vec<u8>,
    width: usize,
    height: usize,
    layout: Layout,
}

impl PixelBuffer {
    /// Create a buffer, validating dimensions against the sample count.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UnsupportedInput`] if either dimension is zero or
    /// `samples.len() != width * height * layout.channels()`.
    pub fn new(
        width: usize,
        height: usize,
        layout: Layout,
        samples: Vec<u8>,
    ) -> Result<Self, PipelineError> {
        if width == 0 || height == 0 {
            return Err(PipelineError::UnsupportedInput(format!(
                "degenerate dimensions {width}x{height}"
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(layout.channels()))
            .ok_or_else(|| {
                PipelineError::UnsupportedInput(format!("dimensions {width}x{height} overflow"))
            })?;
        if samples.len() != expected {
            return Err(PipelineError::UnsupportedInput(format!(
                "expected {expected} samples for {width}x{height} {layout}, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            samples,
            width,
            height,
            layout,
        })
    }

    /// Create a single-channel buffer.
    pub fn from_gray(width: usize, height: usize, samples: Vec<u8>) -> Result<Self, PipelineError> {
        Self::new(width, height, Layout::Gray, samples)
    }

    /// Create a three-channel buffer in RGB order.
    pub fn from_rgb(width: usize, height: usize, samples: Vec<u8>) -> Result<Self, PipelineError> {
        Self::new(width, height, Layout::Rgb, samples)
    }

    /// Build a buffer with the same dimensions as `self` but new samples.
    ///
    /// Used by stages that change layout (e.g. thresholds producing a mask).
    pub(crate) fn with_samples(&self, layout: Layout, samples: Vec<u8>) -> Self {
        debug_assert_eq!(samples.len(), self.width * self.height * layout.channels());
        Self {
            samples,
            width: self.width,
            height: self.height,
            layout,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    #[inline]
    pub fn is_color(&self) -> bool {
        self.layout.is_color()
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// All samples, row-major, interleaved.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    #[inline]
    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Consume the buffer and return its samples.
    #[inline]
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Samples of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let c = self.channels();
        let start = (y * self.width + x) * c;
        &self.samples[start..start + c]
    }

    /// Reorder a three-channel buffer to `order`.
    ///
    /// RGB → BGR → RGB restores the original samples exactly. Single-channel
    /// buffers and same-order requests are returned unchanged.
    pub fn to_order(mut self, order: Layout) -> Self {
        if !self.is_color() || !order.is_color() || self.layout == order {
            return self;
        }
        for px in self.samples.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
        self.layout = order;
        self
    }

    /// Fail unless the buffer has three channels.
    pub fn require_color(&self, operation: &'static str) -> Result<(), PipelineError> {
        if self.is_color() {
            Ok(())
        } else {
            Err(PipelineError::InvalidChannelShape {
                operation,
                expected: "three-channel",
                actual: self.layout,
            })
        }
    }

    /// Fail unless the buffer has a single channel.
    pub fn require_gray(&self, operation: &'static str) -> Result<(), PipelineError> {
        if self.is_color() {
            Err(PipelineError::InvalidChannelShape {
                operation,
                expected: "single-channel",
                actual: self.layout,
            })
        } else {
            Ok(())
        }
    }
}
