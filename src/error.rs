use thiserror::Error;

/// Failures surfaced by the remote API adapter.
///
/// The adapter performs no retries; every failure is reported verbatim to
/// the caller, which decides what (if anything) to do about it.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("server error: {message}")]
    Server { message: String },

    #[error("invalid request: {message}")]
    Validation { message: String },
}

impl ApiError {
    /// Classify an HTTP status line into the adapter taxonomy.
    ///
    /// 401/403 are authentication failures, other 4xx carry a server-side
    /// validation message, and 5xx are server faults.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            400..=499 => Self::Validation { message },
            _ => Self::Server { message },
        }
    }

    /// Check whether this failure means the credential is missing or stale.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid wallet id: {0}")]
    InvalidWalletId(#[from] uuid::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Result alias for adapter calls, which fail only with [`ApiError`].
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
