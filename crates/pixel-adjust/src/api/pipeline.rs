//! Pipeline -- the entry point that turns parameters into an adjusted buffer.

use crate::buffer::{Layout, PixelBuffer};
use crate::ops::{self, Operation};
use crate::params::{AdjustOptions, AdjustmentParameters};

use super::PipelineError;

/// Validated, reusable adjustment pipeline.
///
/// # Design
///
/// - Construction validates the whole configuration, so [`run`](Self::run)
///   can only fail on the shape of the buffer it is given
/// - The operation list is planned once; neutral parameters are absent
/// - [`run`](Self::run) takes `&self`, so one pipeline serves any number of
///   buffers and can be shared across threads
///
/// # Example
///
/// ```
/// use pixel_adjust::{AdjustOptions, Pipeline, PixelBuffer};
///
/// let pipeline = Pipeline::new(AdjustOptions::new().exposure(2.0)).unwrap();
///
/// let buffer = PixelBuffer::from_rgb(1, 1, vec![10, 20, 200]).unwrap();
/// let out = pipeline.run(buffer).unwrap();
/// assert_eq!(out.samples(), &[20, 40, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: AdjustOptions,
    operations: Vec<Operation>,
}

impl Pipeline {
    /// Validate `options` and plan the operations they enable.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidParameter`] if a value is outside its domain
    /// - [`PipelineError::InvalidChannelShape`] if the hue mask is combined
    ///   with a threshold step, since the threshold would hand the mask a
    ///   single-channel buffer
    pub fn new(options: AdjustOptions) -> Result<Self, PipelineError> {
        options.validate()?;

        if options.apply_hsv && options.collapses_channels() {
            return Err(PipelineError::InvalidChannelShape {
                operation: "hue mask",
                expected: "three-channel",
                actual: Layout::Gray,
            });
        }

        let operations = ops::plan(&options);
        Ok(Self {
            options,
            operations,
        })
    }

    /// Parse a raw parameter map and build a pipeline from it.
    pub fn from_params(params: &AdjustmentParameters) -> Result<Self, PipelineError> {
        Self::new(AdjustOptions::from_params(params)?)
    }

    /// The options this pipeline was built from.
    pub fn options(&self) -> &AdjustOptions {
        &self.options
    }

    /// Operations that will run, in order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Whether [`run`](Self::run) returns its input unchanged.
    pub fn is_identity(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply every planned operation to `buffer` in order.
    ///
    /// The first failing operation aborts the run; its error is returned and
    /// no partially adjusted buffer escapes.
    pub fn run(&self, buffer: PixelBuffer) -> Result<PixelBuffer, PipelineError> {
        tracing::debug!(
            width = buffer.width(),
            height = buffer.height(),
            layout = %buffer.layout(),
            operations = self.operations.len(),
            "Running pipeline"
        );

        self.operations.iter().try_fold(buffer, |buffer, op| {
            tracing::debug!(stage = %op.stage(), operation = %op, "Applying");
            op.apply(buffer).inspect_err(|e| {
                tracing::debug!(operation = op.name(), error = %e, "Operation failed");
            })
        })
    }
}

/// Parse `params`, then run the resulting pipeline on `buffer`.
///
/// ```
/// use pixel_adjust::{process, AdjustmentParameters, PixelBuffer};
///
/// let buffer = PixelBuffer::from_gray(2, 1, vec![127, 129]).unwrap();
/// let params = AdjustmentParameters::from_pairs([("global_threshold", "128")]);
///
/// // 128 is the neutral cutoff: nothing happens
/// assert_eq!(process(buffer.clone(), &params).unwrap(), buffer);
/// ```
pub fn process(
    buffer: PixelBuffer,
    params: &AdjustmentParameters,
) -> Result<PixelBuffer, PipelineError> {
    Pipeline::from_params(params)?.run(buffer)
}
