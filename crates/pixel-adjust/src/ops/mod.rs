//! The five adjustment stages and their composition.
//!
//! Every stage is a pure function `PixelBuffer + parameters -> PixelBuffer`.
//! [`plan`] turns an [`AdjustOptions`] into the ordered list of operations
//! that actually change something; neutral parameters never produce an
//! [`Operation`], so they cannot touch a single sample.

pub mod color;
pub mod effect;
pub mod grayscale;
mod kernel;
pub mod threshold;
pub mod tonal;

use std::fmt;

pub use color::ColorShift;

use crate::api::PipelineError;
use crate::buffer::PixelBuffer;
use crate::params::{AdjustOptions, GLOBAL_THRESHOLD_NEUTRAL};

/// Pipeline stages in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Grayscale,
    Color,
    Tonal,
    Effect,
    Threshold,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Grayscale => "grayscale",
            Stage::Color => "color",
            Stage::Tonal => "tonal",
            Stage::Effect => "effect",
            Stage::Threshold => "threshold",
        };
        f.write_str(name)
    }
}

/// One non-neutral adjustment with its typed parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Grayscale,
    Color(ColorShift),
    Brightness(f32),
    Contrast(f32),
    Exposure(f32),
    Shadows(f32),
    Highlights(f32),
    Sharpness(f32),
    Definition(f32),
    Blur(u32),
    Brilliance(f32),
    GlobalThreshold(u8),
    AdaptiveThreshold(i32),
    OtsuThreshold,
    HueMask { lower: u8, upper: u8 },
}

impl Operation {
    /// Stage this operation belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Operation::Grayscale => Stage::Grayscale,
            Operation::Color(_) => Stage::Color,
            Operation::Brightness(_)
            | Operation::Contrast(_)
            | Operation::Exposure(_)
            | Operation::Shadows(_)
            | Operation::Highlights(_) => Stage::Tonal,
            Operation::Sharpness(_)
            | Operation::Definition(_)
            | Operation::Blur(_)
            | Operation::Brilliance(_) => Stage::Effect,
            Operation::GlobalThreshold(_)
            | Operation::AdaptiveThreshold(_)
            | Operation::OtsuThreshold
            | Operation::HueMask { .. } => Stage::Threshold,
        }
    }

    /// Stable name, matching the request parameter that enables it.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Grayscale => "grayscale",
            Operation::Color(_) => "color",
            Operation::Brightness(_) => "brightness",
            Operation::Contrast(_) => "contrast",
            Operation::Exposure(_) => "exposure",
            Operation::Shadows(_) => "shadows",
            Operation::Highlights(_) => "highlights",
            Operation::Sharpness(_) => "sharpness",
            Operation::Definition(_) => "definition",
            Operation::Blur(_) => "blur",
            Operation::Brilliance(_) => "brilliance",
            Operation::GlobalThreshold(_) => "global_threshold",
            Operation::AdaptiveThreshold(_) => "adaptive_threshold",
            Operation::OtsuThreshold => "otsu_threshold",
            Operation::HueMask { .. } => "apply_hsv",
        }
    }

    /// Whether the result is always a single-channel mask.
    pub fn produces_mask(&self) -> bool {
        self.stage() == Stage::Threshold
    }

    /// Run this operation on `buffer`.
    pub fn apply(&self, buffer: PixelBuffer) -> Result<PixelBuffer, PipelineError> {
        match *self {
            Operation::Grayscale => Ok(grayscale::grayscale(buffer)),
            Operation::Color(shift) => color::adjust_color(buffer, shift),
            Operation::Brightness(f) => tonal::brightness(buffer, f),
            Operation::Contrast(f) => Ok(tonal::contrast(buffer, f)),
            Operation::Exposure(f) => Ok(tonal::exposure(buffer, f)),
            Operation::Shadows(f) => tonal::shadows(buffer, f),
            Operation::Highlights(f) => Ok(tonal::highlights(buffer, f)),
            Operation::Sharpness(f) => Ok(effect::sharpness(buffer, f)),
            Operation::Definition(f) => Ok(effect::definition(buffer, f)),
            Operation::Blur(r) if r > effect::MAX_BLUR_RADIUS => Err(PipelineError::invalid(
                "blur",
                r.to_string(),
                format!("must be at most {}", effect::MAX_BLUR_RADIUS),
            )),
            Operation::Blur(r) => Ok(effect::blur(buffer, r)),
            Operation::Brilliance(f) => effect::brilliance(buffer, f),
            Operation::GlobalThreshold(t) => Ok(threshold::global(buffer, t)),
            Operation::AdaptiveThreshold(c) => Ok(threshold::adaptive(buffer, c)),
            Operation::OtsuThreshold => Ok(threshold::otsu(buffer)),
            Operation::HueMask { lower, upper } => threshold::hue_mask(buffer, lower, upper),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Grayscale | Operation::OtsuThreshold => f.write_str(self.name()),
            Operation::Color(s) => write!(
                f,
                "color(hue={}, saturation={}, vibrance={})",
                s.hue, s.saturation, s.vibrance
            ),
            Operation::Brightness(v)
            | Operation::Contrast(v)
            | Operation::Exposure(v)
            | Operation::Shadows(v)
            | Operation::Highlights(v)
            | Operation::Sharpness(v)
            | Operation::Definition(v)
            | Operation::Brilliance(v) => write!(f, "{}({v})", self.name()),
            Operation::Blur(r) => write!(f, "blur({r})"),
            Operation::GlobalThreshold(t) => write!(f, "global_threshold({t})"),
            Operation::AdaptiveThreshold(c) => write!(f, "adaptive_threshold({c})"),
            Operation::HueMask { lower, upper } => write!(f, "apply_hsv({lower}..={upper})"),
        }
    }
}

/// Ordered list of the operations `options` actually enable.
///
/// Order is fixed: grayscale, color, tonal (brightness, contrast, exposure,
/// shadows, highlights), effect (sharpness, definition, blur, brilliance),
/// threshold (global, adaptive, Otsu, hue mask).
pub fn plan(options: &AdjustOptions) -> Vec<Operation> {
    let mut ops = Vec::new();

    if options.grayscale {
        ops.push(Operation::Grayscale);
    }

    let shift = ColorShift {
        hue: options.hue,
        saturation: options.saturation,
        vibrance: options.vibrance,
    };
    if !shift.is_neutral() {
        ops.push(Operation::Color(shift));
    }

    let factors: [(f32, fn(f32) -> Operation); 7] = [
        (options.brightness, Operation::Brightness),
        (options.contrast, Operation::Contrast),
        (options.exposure, Operation::Exposure),
        (options.shadows, Operation::Shadows),
        (options.highlights, Operation::Highlights),
        (options.sharpness, Operation::Sharpness),
        (options.definition, Operation::Definition),
    ];
    for (value, op) in factors {
        if value != 1.0 {
            ops.push(op(value));
        }
    }

    if options.blur > 0 {
        ops.push(Operation::Blur(options.blur));
    }
    if options.brilliance != 1.0 {
        ops.push(Operation::Brilliance(options.brilliance));
    }

    if options.global_threshold != GLOBAL_THRESHOLD_NEUTRAL {
        ops.push(Operation::GlobalThreshold(options.global_threshold));
    }
    if options.adaptive_threshold != 0 {
        ops.push(Operation::AdaptiveThreshold(options.adaptive_threshold));
    }
    if options.otsu_threshold {
        ops.push(Operation::OtsuThreshold);
    }
    if options.apply_hsv {
        ops.push(Operation::HueMask {
            lower: options.lower_hue,
            upper: options.upper_hue,
        });
    }

    ops
}
