//! Pixel buffer and channel layout types.

mod layout;
mod pixel_buffer;

pub use layout::Layout;
pub use pixel_buffer::PixelBuffer;
