//! Adjustment parameters: the raw string map and its typed form.
//!
//! Requests arrive as [`AdjustmentParameters`] (name → string value). They are
//! parsed exactly once into [`AdjustOptions`], which every stage reads.

mod options;
mod parse;
mod raw;

pub use options::{AdjustOptions, GLOBAL_THRESHOLD_NEUTRAL};
pub use raw::{default_value, AdjustmentParameters, DEFAULTS};
