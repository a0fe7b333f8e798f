use axum::extract::Multipart;
use pixel_adjust::AdjustmentParameters;
use utoipa::ToSchema;

use crate::error::ApiError;

/// Multipart upload accepted by the processing endpoints.
///
/// Every adjustment field is optional and falls back to its neutral value.
#[derive(Debug, ToSchema)]
pub struct ProcessForm {
    /// Image file (any format the decoder understands)
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// "on" to flatten to luminance first
    #[schema(example = "off")]
    pub grayscale: Option<String>,
    /// Hue rotation in half-degrees (integer, wraps at 180)
    #[schema(example = "0")]
    pub hue: Option<String>,
    /// Saturation multiplier
    #[schema(example = "1")]
    pub saturation: Option<String>,
    /// Saturation multiplier for weakly saturated pixels
    #[schema(example = "1")]
    pub vibrance: Option<String>,
    /// Inverse-gamma factor (> 0)
    #[schema(example = "1")]
    pub brightness: Option<String>,
    /// Contrast factor around the midpoint
    #[schema(example = "1")]
    pub contrast: Option<String>,
    /// Linear gain
    #[schema(example = "1")]
    pub exposure: Option<String>,
    /// Gain for dark pixels (V < 80)
    #[schema(example = "1")]
    pub shadows: Option<String>,
    /// Gain for bright samples (> 0.7)
    #[schema(example = "1")]
    pub highlights: Option<String>,
    /// Unsharp blend factor
    #[schema(example = "1")]
    pub sharpness: Option<String>,
    /// Sharpness and contrast factor
    #[schema(example = "1")]
    pub definition: Option<String>,
    /// Gaussian blur radius
    #[schema(example = "0")]
    pub blur: Option<String>,
    /// Brightness and contrast factor (> 0)
    #[schema(example = "1")]
    pub brilliance: Option<String>,
    /// Binarization cutoff; 128 disables
    #[schema(example = "128")]
    pub global_threshold: Option<String>,
    /// Local-mean offset; 0 disables
    #[schema(example = "0")]
    pub adaptive_threshold: Option<String>,
    /// "on" for automatic cutoff
    #[schema(example = "off")]
    pub otsu_threshold: Option<String>,
    /// "on" for the hue-range mask
    #[schema(example = "off")]
    pub apply_hsv: Option<String>,
    /// Inclusive lower hue bound (0-179)
    #[schema(example = "0")]
    pub lower_hue: Option<String>,
    /// Inclusive upper hue bound (0-179)
    #[schema(example = "179")]
    pub upper_hue: Option<String>,
    /// Array export representation: rgb, hsv or lab
    #[schema(example = "rgb")]
    pub colorspace: Option<String>,
}

/// Image bytes and parameters read from a multipart upload.
#[derive(Debug)]
pub struct Upload {
    pub image: Vec<u8>,
    pub params: AdjustmentParameters,
}

/// Read the `image` file field and every other field as a parameter.
///
/// An absent or empty `image` field is [`ApiError::MissingImage`].
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut image = None;
    let mut pairs = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "image" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Multipart(e.to_string()))?;
            image = Some(bytes.to_vec());
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::Multipart(e.to_string()))?;
            pairs.push((name, value));
        }
    }

    let image = image.filter(|b| !b.is_empty()).ok_or(ApiError::MissingImage)?;
    tracing::debug!(bytes = image.len(), fields = pairs.len(), "Received upload");

    Ok(Upload {
        image,
        params: AdjustmentParameters::from_pairs(pairs),
    })
}
