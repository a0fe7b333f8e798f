//! Typed, immutable adjustment configuration.
//!
//! [`AdjustOptions`] is built once per invocation, either from a raw
//! [`AdjustmentParameters`] map or with the builder methods, and then only
//! read. There is no ambient defaults table at runtime: the neutral values
//! live in [`Default`].

use super::parse;
use super::AdjustmentParameters;
use crate::api::PipelineError;
use crate::color::HUE_RANGE;
use crate::ops::effect::MAX_BLUR_RADIUS;
use crate::export::ColorSpace;

/// Typed configuration for one pipeline invocation.
///
/// # Defaults
///
/// Every field defaults to its neutral value, so `AdjustOptions::default()`
/// leaves a buffer untouched:
/// - Factors (saturation, brightness, contrast, ...): 1.0
/// - Hue shift, blur radius, adaptive offset: 0
/// - Global threshold: 128 (treated as "off")
/// - Flags: off
/// - Hue mask bounds: 0..=179
///
/// # Example
///
/// ```
/// use pixel_adjust::AdjustOptions;
///
/// let options = AdjustOptions::new()
///     .hue(30)
///     .saturation(1.4)
///     .blur(2);
/// assert!(options.validate().is_ok());
/// assert!(!options.is_neutral());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustOptions {
    /// Flatten to luminance before anything else.
    pub grayscale: bool,
    /// Hue shift in half-degrees, wraps modulo 180.
    pub hue: i32,
    /// Saturation multiplier.
    pub saturation: f32,
    /// Saturation multiplier for pixels with S < 128 only.
    pub vibrance: f32,
    /// Inverse-gamma exponent; must be positive.
    pub brightness: f32,
    /// Contrast stretch around the 128 midpoint.
    pub contrast: f32,
    /// Linear gain.
    pub exposure: f32,
    /// V multiplier for pixels with V < 80.
    pub shadows: f32,
    /// Multiplier for normalized samples above 0.7.
    pub highlights: f32,
    /// Unsharp blend intensity.
    pub sharpness: f32,
    /// Sharpness and contrast at the same factor.
    pub definition: f32,
    /// Gaussian radius; kernel size is `2 * blur + 1`.
    pub blur: u32,
    /// Brightness and contrast at the same factor; must be positive.
    pub brilliance: f32,
    /// Binarization cutoff; 128 disables the step.
    pub global_threshold: u8,
    /// Constant subtracted from the local mean; 0 disables the step.
    pub adaptive_threshold: i32,
    /// Automatic cutoff selection.
    pub otsu_threshold: bool,
    /// Hue-range mask.
    pub apply_hsv: bool,
    /// Inclusive lower hue bound of the mask.
    pub lower_hue: u8,
    /// Inclusive upper hue bound of the mask.
    pub upper_hue: u8,
    /// Representation requested by the array export.
    pub colorspace: ColorSpace,
}

/// Global threshold value that means "not requested".
pub const GLOBAL_THRESHOLD_NEUTRAL: u8 = 128;

impl Default for AdjustOptions {
    fn default() -> Self {
        Self {
            grayscale: false,
            hue: 0,
            saturation: 1.0,
            vibrance: 1.0,
            brightness: 1.0,
            contrast: 1.0,
            exposure: 1.0,
            shadows: 1.0,
            highlights: 1.0,
            sharpness: 1.0,
            definition: 1.0,
            blur: 0,
            brilliance: 1.0,
            global_threshold: GLOBAL_THRESHOLD_NEUTRAL,
            adaptive_threshold: 0,
            otsu_threshold: false,
            apply_hsv: false,
            lower_hue: 0,
            upper_hue: HUE_RANGE - 1,
            colorspace: ColorSpace::Rgb,
        }
    }
}

impl AdjustOptions {
    /// Neutral options; equivalent to `AdjustOptions::default()`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a raw parameter map.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidParameter`] naming the first parameter that
    /// fails to parse or lies outside its domain.
    pub fn from_params(params: &AdjustmentParameters) -> Result<Self, PipelineError> {
        let raw = |name: &str| params.get(name).unwrap_or_default();

        for key in params.unknown_keys() {
            tracing::debug!(parameter = %key, "Ignoring unrecognized parameter");
        }

        let options = Self {
            grayscale: parse::flag("grayscale", raw("grayscale"))?,
            hue: parse::integer("hue", raw("hue"))? as i32,
            saturation: parse::number("saturation", raw("saturation"))?,
            vibrance: parse::number("vibrance", raw("vibrance"))?,
            brightness: parse::number("brightness", raw("brightness"))?,
            contrast: parse::number("contrast", raw("contrast"))?,
            exposure: parse::number("exposure", raw("exposure"))?,
            shadows: parse::number("shadows", raw("shadows"))?,
            highlights: parse::number("highlights", raw("highlights"))?,
            sharpness: parse::number("sharpness", raw("sharpness"))?,
            definition: parse::number("definition", raw("definition"))?,
            blur: {
                let r = parse::truncated_int("blur", raw("blur"))?;
                u32::try_from(r)
                    .map_err(|_| PipelineError::invalid("blur", raw("blur"), "must not be negative"))?
            },
            brilliance: parse::number("brilliance", raw("brilliance"))?,
            global_threshold: {
                let t = parse::truncated_int("global_threshold", raw("global_threshold"))?;
                u8::try_from(t).map_err(|_| {
                    PipelineError::invalid(
                        "global_threshold",
                        raw("global_threshold"),
                        "must be within 0..=255",
                    )
                })?
            },
            adaptive_threshold: parse::truncated_int(
                "adaptive_threshold",
                raw("adaptive_threshold"),
            )? as i32,
            otsu_threshold: parse::flag("otsu_threshold", raw("otsu_threshold"))?,
            apply_hsv: parse::flag("apply_hsv", raw("apply_hsv"))?,
            lower_hue: hue_bound("lower_hue", raw("lower_hue"))?,
            upper_hue: hue_bound("upper_hue", raw("upper_hue"))?,
            colorspace: raw("colorspace").parse()?,
        };

        options.validate()?;
        Ok(options)
    }

    /// Check domain constraints that hold regardless of how the options
    /// were built.
    ///
    /// Only configuration is validated here; pixel values are always
    /// clamped by the stages themselves.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let finite = [
            ("saturation", self.saturation),
            ("vibrance", self.vibrance),
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("exposure", self.exposure),
            ("shadows", self.shadows),
            ("highlights", self.highlights),
            ("sharpness", self.sharpness),
            ("definition", self.definition),
            ("brilliance", self.brilliance),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(PipelineError::invalid(name, value.to_string(), "must be finite"));
            }
        }

        for (name, value) in [("brightness", self.brightness), ("brilliance", self.brilliance)] {
            if value <= 0.0 {
                return Err(PipelineError::invalid(
                    name,
                    value.to_string(),
                    "must be greater than zero",
                ));
            }
        }

        let gains = [
            ("saturation", self.saturation),
            ("vibrance", self.vibrance),
            ("exposure", self.exposure),
            ("shadows", self.shadows),
            ("highlights", self.highlights),
        ];
        for (name, value) in gains {
            if value < 0.0 {
                return Err(PipelineError::invalid(
                    name,
                    value.to_string(),
                    "must not be negative",
                ));
            }
        }

        if self.blur > MAX_BLUR_RADIUS {
            return Err(PipelineError::invalid(
                "blur",
                self.blur.to_string(),
                format!("must be at most {MAX_BLUR_RADIUS}"),
            ));
        }

        for (name, value) in [("lower_hue", self.lower_hue), ("upper_hue", self.upper_hue)] {
            if value >= HUE_RANGE {
                return Err(PipelineError::invalid(
                    name,
                    value.to_string(),
                    "must be within 0..=179",
                ));
            }
        }

        Ok(())
    }

    /// Whether these options leave every buffer untouched.
    pub fn is_neutral(&self) -> bool {
        crate::ops::plan(self).is_empty()
    }

    /// Whether any threshold step that collapses to one channel is enabled.
    pub fn collapses_channels(&self) -> bool {
        self.global_threshold != GLOBAL_THRESHOLD_NEUTRAL
            || self.adaptive_threshold != 0
            || self.otsu_threshold
    }

    #[inline]
    pub fn grayscale(mut self, enabled: bool) -> Self {
        self.grayscale = enabled;
        self
    }

    #[inline]
    pub fn hue(mut self, shift: i32) -> Self {
        self.hue = shift;
        self
    }

    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.saturation = factor;
        self
    }

    #[inline]
    pub fn vibrance(mut self, factor: f32) -> Self {
        self.vibrance = factor;
        self
    }

    #[inline]
    pub fn brightness(mut self, factor: f32) -> Self {
        self.brightness = factor;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    #[inline]
    pub fn exposure(mut self, factor: f32) -> Self {
        self.exposure = factor;
        self
    }

    #[inline]
    pub fn shadows(mut self, factor: f32) -> Self {
        self.shadows = factor;
        self
    }

    #[inline]
    pub fn highlights(mut self, factor: f32) -> Self {
        self.highlights = factor;
        self
    }

    #[inline]
    pub fn sharpness(mut self, factor: f32) -> Self {
        self.sharpness = factor;
        self
    }

    #[inline]
    pub fn definition(mut self, factor: f32) -> Self {
        self.definition = factor;
        self
    }

    #[inline]
    pub fn blur(mut self, radius: u32) -> Self {
        self.blur = radius;
        self
    }

    #[inline]
    pub fn brilliance(mut self, factor: f32) -> Self {
        self.brilliance = factor;
        self
    }

    #[inline]
    pub fn global_threshold(mut self, cutoff: u8) -> Self {
        self.global_threshold = cutoff;
        self
    }

    #[inline]
    pub fn adaptive_threshold(mut self, offset: i32) -> Self {
        self.adaptive_threshold = offset;
        self
    }

    #[inline]
    pub fn otsu_threshold(mut self, enabled: bool) -> Self {
        self.otsu_threshold = enabled;
        self
    }

    /// Enable the hue-range mask with inclusive bounds.
    #[inline]
    pub fn hue_mask(mut self, lower: u8, upper: u8) -> Self {
        self.apply_hsv = true;
        self.lower_hue = lower;
        self.upper_hue = upper;
        self
    }

    #[inline]
    pub fn colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }
}

fn hue_bound(name: &str, raw: &str) -> Result<u8, PipelineError> {
    let value = parse::integer(name, raw)?;
    u8::try_from(value)
        .ok()
        .filter(|v| *v < HUE_RANGE)
        .ok_or_else(|| PipelineError::invalid(name, raw, "must be within 0..=179"))
}
