//! Test fixtures: encoded images and multipart bodies.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

const BOUNDARY: &str = "imgg-test-boundary";

/// Encode an RGB image as PNG
pub fn png(img: RgbImage) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("Failed to encode PNG");
    cursor.into_inner()
}

/// Solid-color PNG
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    png(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// Left half dark (30), right half bright (220)
pub fn split_png(width: u32, height: u32) -> Vec<u8> {
    png(RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([30, 30, 30])
        } else {
            Rgb([220, 220, 220])
        }
    }))
}

/// Builder for `multipart/form-data` request bodies
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Add the `image` file field
    pub fn image(self, data: &[u8]) -> Self {
        self.file("image", "upload.png", data)
    }

    /// Add a file field
    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    /// Add a text field
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.bytes
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}
