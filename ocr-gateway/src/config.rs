use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: i64 = 10;

/// Reads an environment variable, treating an empty value as unset.
fn env_var(var: &str) -> Option<String> {
    env::var(var).ok().filter(|val| !val.is_empty())
}

fn parse_env_or<T: std::str::FromStr + std::fmt::Display>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env_var(var) {
        Some(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(
                    "Invalid value '{}' for {}: {}. Using default: {}.",
                    val,
                    var,
                    e,
                    default
                );
                default
            }
        },
        None => default,
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
}

/// Listener settings. Values are stored exactly as configured; nothing here
/// rejects a zero or negative number.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: String,
    pub timeout_secs: i64,
    pub max_upload_size_mb: i64,
}

#[derive(Debug, Clone, Default)]
pub struct OcrConfig {
    /// Directory containing `*.traineddata` files. `None` lets Tesseract use
    /// `TESSDATA_PREFIX` or its compiled-in location.
    pub tessdata_dir: Option<String>,
}

impl ServerConfig {
    /// Read, write and request timeout. A non-positive value disables it.
    pub fn timeout(&self) -> Option<Duration> {
        u64::try_from(self.timeout_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Upload ceiling in bytes. Negative sizes collapse to zero.
    pub fn max_upload_bytes(&self) -> usize {
        usize::try_from(self.max_upload_size_mb)
            .map(|mb| mb.saturating_mul(1 << 20))
            .unwrap_or(0)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_upload_size_mb: DEFAULT_MAX_UPLOAD_SIZE_MB,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: env_var("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string()),
                timeout_secs: parse_env_or("OCR_TIMEOUT", DEFAULT_TIMEOUT_SECS),
                max_upload_size_mb: parse_env_or("OCR_MAX_FILE_SIZE", DEFAULT_MAX_UPLOAD_SIZE_MB),
            },
            ocr: OcrConfig {
                tessdata_dir: env_var("OCR_TESSDATA_DIR"),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
