//! Public API for the pixel-adjust crate.
//!
//! This module provides the high-level entry points: the [`Pipeline`]
//! builder, the one-shot [`process`] call and the unified [`PipelineError`].

mod error;
mod pipeline;

pub use error::PipelineError;
pub use pipeline::{process, Pipeline};
