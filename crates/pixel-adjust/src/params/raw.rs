//! String-typed parameter map as received from a request.

use std::collections::HashMap;

/// Recognized parameters and their neutral values.
///
/// An operation is skipped when its value equals the default listed here.
pub const DEFAULTS: &[(&str, &str)] = &[
    ("grayscale", "off"),
    ("hue", "0"),
    ("saturation", "1"),
    ("vibrance", "1"),
    ("brightness", "1"),
    ("contrast", "1"),
    ("exposure", "1"),
    ("shadows", "1"),
    ("highlights", "1"),
    ("sharpness", "1"),
    ("definition", "1"),
    ("blur", "0"),
    ("brilliance", "1"),
    ("global_threshold", "128"),
    ("adaptive_threshold", "0"),
    ("otsu_threshold", "off"),
    ("apply_hsv", "off"),
    ("lower_hue", "0"),
    ("upper_hue", "179"),
    ("colorspace", "rgb"),
];

/// Look up the default value of a recognized parameter.
pub fn default_value(name: &str) -> Option<&'static str> {
    DEFAULTS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
}

/// Mapping from operation name to its raw string value.
///
/// Built once per request and never mutated afterwards; [`with`](Self::with)
/// returns a new map. Missing keys read as their [`DEFAULTS`] entry and
/// unknown keys are kept but ignored by the pipeline.
///
/// # Example
///
/// ```
/// use pixel_adjust::AdjustmentParameters;
///
/// let params = AdjustmentParameters::from_pairs([("blur", "2")]);
/// assert_eq!(params.get("blur"), Some("2"));
/// assert_eq!(params.get("contrast"), Some("1"));
/// assert_eq!(params.get("nonsense"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustmentParameters {
    values: HashMap<String, String>,
}

impl AdjustmentParameters {
    /// Empty parameter set: every operation at its neutral value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs. Later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Return a copy with one value replaced.
    pub fn with(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = self.values.clone();
        values.insert(name.into(), value.into());
        Self { values }
    }

    /// Value for `name`, falling back to its default.
    ///
    /// Returns `None` only for names that were neither supplied nor recognized.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .or_else(|| default_value(name))
    }

    /// Whether `name` was explicitly supplied.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Supplied keys that the pipeline does not recognize.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| default_value(k).is_none())
    }
}
