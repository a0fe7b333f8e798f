//! Unified error type for the pixel-adjust public API.
//!
//! Every stage validates its inputs before mutating anything, so a
//! [`PipelineError`] always means the whole invocation was abandoned and no
//! partially adjusted buffer escaped.

use thiserror::Error;

use crate::buffer::Layout;

/// Error returned by [`process`](crate::process) and [`Pipeline::run`](crate::Pipeline::run).
///
/// # Example
///
/// ```
/// use pixel_adjust::{AdjustmentParameters, PipelineError, PixelBuffer, process};
///
/// let buffer = PixelBuffer::from_rgb(1, 1, vec![10, 20, 30]).unwrap();
/// let params = AdjustmentParameters::from_pairs([("brightness", "0")]);
///
/// match process(buffer, &params) {
///     Err(PipelineError::InvalidParameter { name, .. }) => assert_eq!(name, "brightness"),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A parameter could not be parsed or is outside its valid domain.
    #[error("invalid parameter {name}={value:?}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the request
        name: String,
        /// Raw value that was rejected
        value: String,
        /// Human readable explanation
        reason: String,
    },

    /// An operation received a buffer with the wrong number of channels.
    #[error("{operation} requires a {expected} buffer, got {actual}")]
    InvalidChannelShape {
        /// Operation that rejected the buffer
        operation: &'static str,
        /// Shape the operation needs
        expected: &'static str,
        /// Layout that was supplied
        actual: Layout,
    },

    /// The buffer itself is degenerate (zero dimensions, wrong sample count).
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
}

impl PipelineError {
    pub(crate) fn invalid(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PipelineError::InvalidParameter {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter, if this is a parameter error.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            PipelineError::InvalidParameter { name, .. } => Some(name),
            _ => None,
        }
    }
}
