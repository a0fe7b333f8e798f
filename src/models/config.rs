use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Server configuration loaded from an optional YAML file and the
/// environment.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Concurrent processing jobs
    pub workers: usize,

    /// Upper bound for one request, including the wait for a worker
    pub request_timeout_secs: u64,

    /// Largest accepted multipart body
    pub max_upload_bytes: usize,

    /// JPEG quality for image responses (1-100)
    pub jpeg_quality: u8,
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5002".to_string(),
            workers: default_workers(),
            request_timeout_secs: 30,
            max_upload_bytes: 32 * 1024 * 1024,
            jpeg_quality: 75,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `CONFIG_FILE` (if set) and apply environment
    /// overrides.
    pub fn from_env() -> Self {
        let file = std::env::var("CONFIG_FILE").ok();
        Self::load(file.as_deref().map(Path::new)).with_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from a YAML file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply `BIND_ADDR`, `WORKERS`, `REQUEST_TIMEOUT_SECS`,
    /// `MAX_UPLOAD_BYTES` and `JPEG_QUALITY` from `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = addr;
        }
        override_parsed(&lookup, "WORKERS", &mut self.workers);
        override_parsed(&lookup, "REQUEST_TIMEOUT_SECS", &mut self.request_timeout_secs);
        override_parsed(&lookup, "MAX_UPLOAD_BYTES", &mut self.max_upload_bytes);
        override_parsed(&lookup, "JPEG_QUALITY", &mut self.jpeg_quality);
        self.sanitized()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn sanitized(mut self) -> Self {
        if self.workers == 0 {
            tracing::warn!("workers must be at least 1, using available cores");
            self.workers = default_workers();
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            tracing::warn!(quality = self.jpeg_quality, "jpeg_quality out of range, clamping");
            self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        }
        self
    }
}

fn override_parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) {
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => *slot = value,
            Err(_) => tracing::warn!(key, value = %raw, "Ignoring unparseable override"),
        }
    }
}
