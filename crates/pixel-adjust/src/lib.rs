#![allow(clippy::needless_range_loop, clippy::manual_range_contains)]

//! pixel-adjust: ordered tonal, color, effect and threshold adjustments for
//! 8-bit raster images
//!
//! # Quick Start
//!
//! The one-shot [`process`] call takes a buffer and the string parameters of
//! a request:
//!
//! ```
//! use pixel_adjust::{process, AdjustmentParameters, PixelBuffer};
//!
//! let buffer = PixelBuffer::from_rgb(2, 1, vec![200, 40, 40, 10, 10, 10]).unwrap();
//! let params = AdjustmentParameters::from_pairs([("hue", "60"), ("contrast", "1.2")]);
//!
//! let out = process(buffer, &params).unwrap();
//! assert_eq!(out.width(), 2);
//! ```
//!
//! For typed configuration, build [`AdjustOptions`] and reuse a [`Pipeline`]:
//!
//! ```
//! use pixel_adjust::{AdjustOptions, Pipeline, PixelBuffer};
//!
//! let pipeline = Pipeline::new(AdjustOptions::new().grayscale(true).blur(1)).unwrap();
//! for _ in 0..3 {
//!     let buffer = PixelBuffer::from_rgb(4, 4, vec![90; 48]).unwrap();
//!     assert_eq!(pipeline.run(buffer).unwrap().samples(), &[90; 48][..]);
//! }
//! ```
//!
//! # Stages
//!
//! Operations always run in this order, and an operation whose parameter is
//! neutral is never run:
//!
//! | Stage | Operations | Neutral value |
//! |-------|------------|---------------|
//! | Grayscale | `grayscale` | off |
//! | Color | `hue`, `saturation`, `vibrance` | 0, 1, 1 |
//! | Tonal | `brightness`, `contrast`, `exposure`, `shadows`, `highlights` | 1 |
//! | Effect | `sharpness`, `definition`, `blur`, `brilliance` | 1, 1, 0, 1 |
//! | Threshold | `global_threshold`, `adaptive_threshold`, `otsu_threshold`, `apply_hsv` | 128, 0, off, off |
//!
//! Threshold operations replace the buffer with a single-channel 0/255 mask.
//! The hue-range mask needs color input, so combining it with another
//! threshold is rejected before any pixel is touched.
//!
//! # Numeric Conventions
//!
//! - Every float result is rounded, then clamped to `0..=255`
//! - Hue is stored on a half circle (`0..=179`) and always wraps
//! - Shadows select `V < 80` on the 8-bit scale while highlights select
//!   normalized samples `> 0.7`; the two cutoffs are calibrated separately
//! - Channel order of three-channel buffers is explicit ([`Layout`]) and
//!   respected by every conversion

pub mod api;
pub mod buffer;
pub mod color;
pub mod export;
pub mod ops;
pub mod params;


pub use api::{process, Pipeline, PipelineError};
pub use buffer::{Layout, PixelBuffer};
pub use export::{convert, ChannelArray, ColorSpace};
pub use ops::{Operation, Stage};
pub use params::{AdjustOptions, AdjustmentParameters};
