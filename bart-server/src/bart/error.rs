//! BART client error types.

use crate::domain::StationCode;

use super::convert::ConversionError;

/// Errors from fetching one station's ETD board.
#[derive(Debug, thiserror::Error)]
pub enum BartError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by BART API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// The response parsed but held no usable station board
    #[error("no usable data for {station}: {source}")]
    NoStationData {
        station: StationCode,
        #[source]
        source: ConversionError,
    },

    /// No response within the fetch deadline
    #[error("request for {0} timed out")]
    Timeout(StationCode),
}
