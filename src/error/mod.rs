//! Error handling module for ShortForge

use thiserror::Error;

/// Main error type for ShortForge operations
#[derive(Error, Debug)]
pub enum ShortForgeError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Invalid timestamp text
    #[error("Invalid timestamp: {value}. Expected HH:MM:SS,mmm")]
    InvalidTimestamp { value: String },

    /// Provider credentials missing
    #[error("Missing credentials for {provider}: set {env_var}")]
    MissingCredentials { provider: String, env_var: String },

    /// Provider search/download exhausted all candidates
    #[error("{provider} returned no usable results for any query")]
    ProviderExhausted { provider: String },

    /// Media download failed
    #[error("Failed to download {url}: {message}")]
    DownloadError { url: String, message: String },

    /// ffmpeg invocation failed
    #[error("ffmpeg exited with status {status}: {stderr}")]
    FfmpegError { status: i32, stderr: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for ShortForge operations
pub type ShortForgeResult<T> = std::result::Result<T, ShortForgeError>;
