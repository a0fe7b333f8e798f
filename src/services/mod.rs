pub mod codec;
pub mod processor;

pub use codec::{decode, downscale_half, encode_jpeg};
pub use processor::ImageProcessor;
