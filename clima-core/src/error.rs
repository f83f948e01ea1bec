/// Failure taxonomy for a single pipeline invocation.
///
/// Every variant is terminal: nothing is retried automatically, the user
/// resubmits. The coordinate fallback chain catches these internally to move
/// on to the next source instead of surfacing them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input rejected locally; no network call was made.
    #[error("{0}")]
    Validation(String),

    /// The service answered with a non-2xx status.
    #[error("failed to query {service}")]
    HttpStatus { service: &'static str, status: u16 },

    /// The directory answered OK but flagged the code as unknown.
    #[error("postal code not found")]
    NotFound,

    /// The shared deadline expired while the call was in flight.
    #[error("query timed out")]
    Timeout,

    /// The response decoded but the expected fields were absent.
    #[error("{0}")]
    MalformedResponse(String),

    /// Transport-level failure from the HTTP client.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not valid JSON.
    #[error("malformed JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn http_status(service: &'static str, status: u16) -> Self {
        Error::HttpStatus { service, status }
    }
}
