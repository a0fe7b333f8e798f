//! Conversion between encoded image files and [`PixelBuffer`]s.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, GrayImage, RgbImage};
use pixel_adjust::{Layout, PipelineError, PixelBuffer};

use crate::error::CodecError;

/// Decode any format the `image` crate understands into an RGB buffer.
///
/// Alpha is dropped and grayscale images are expanded to three channels.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
    let img = image::load_from_memory(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    tracing::debug!(width, height, bytes = bytes.len(), "Decoded upload");

    Ok(PixelBuffer::from_rgb(
        width as usize,
        height as usize,
        rgb.into_raw(),
    )?)
}

/// Halve both dimensions (bicubic).
///
/// # Errors
///
/// [`PipelineError::UnsupportedInput`] if either halved dimension is zero.
pub fn downscale_half(buffer: &PixelBuffer) -> Result<PixelBuffer, PipelineError> {
    let (width, height) = (buffer.width() / 2, buffer.height() / 2);
    if width == 0 || height == 0 {
        return Err(PipelineError::UnsupportedInput(format!(
            "{}x{} image is too small to downscale",
            buffer.width(),
            buffer.height()
        )));
    }

    let (src_w, src_h) = (buffer.width() as u32, buffer.height() as u32);
    let (dst_w, dst_h) = (width as u32, height as u32);

    let (layout, samples) = match buffer.layout() {
        Layout::Gray => {
            let img = GrayImage::from_raw(src_w, src_h, buffer.samples().to_vec())
                .ok_or_else(|| PipelineError::UnsupportedInput("sample count mismatch".into()))?;
            let resized = imageops::resize(&img, dst_w, dst_h, FilterType::CatmullRom);
            (Layout::Gray, resized.into_raw())
        }
        Layout::Rgb | Layout::Bgr => {
            let img = RgbImage::from_raw(src_w, src_h, buffer.samples().to_vec())
                .ok_or_else(|| PipelineError::UnsupportedInput("sample count mismatch".into()))?;
            let resized = imageops::resize(&img, dst_w, dst_h, FilterType::CatmullRom);
            (buffer.layout(), resized.into_raw())
        }
    };

    tracing::debug!(width, height, "Downscaled preview");
    PixelBuffer::new(width, height, layout, samples)
}

/// Encode a buffer as baseline JPEG.
///
/// Single-channel buffers become grayscale JPEGs. BGR buffers are reordered
/// to RGB first.
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, CodecError> {
    let (color_type, samples) = match buffer.layout() {
        Layout::Gray => (ExtendedColorType::L8, buffer.samples().to_vec()),
        Layout::Rgb => (ExtendedColorType::Rgb8, buffer.samples().to_vec()),
        Layout::Bgr => (
            ExtendedColorType::Rgb8,
            buffer.clone().to_order(Layout::Rgb).into_samples(),
        ),
    };

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode(
            &samples,
            buffer.width() as u32,
            buffer.height() as u32,
            color_type,
        )
        .map_err(|e| CodecError::Encode(e.to_string()))?;

    tracing::debug!(bytes = out.len(), quality, "Encoded JPEG");
    Ok(out)
}
