use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    NetworkError(String),

    /// Application-level failure reported by the exchange, either as a
    /// non-2xx HTTP response or inside a 2xx envelope with a non-success
    /// code. `status` is `None` when the HTTP layer itself succeeded.
    #[error("API error {code}: {message}")]
    ApiError {
        status: Option<u16>,
        code: String,
        message: String,
    },

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid response format: {0}")]
    InvalidResponseFormat(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    /// Whether the exchange itself rejected the request, as opposed to a
    /// transport or decoding failure. The trade paginator treats these as
    /// page-level failures and keeps the data accumulated so far.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::ApiError { .. })
    }
}
