use thiserror::Error;

/// Errors that can occur while paging through WOW observations
///
/// Every variant is fatal to a run: the fetch loop never retries or skips a page.
#[derive(Error, Debug)]
pub enum ObservationsError {
    /// Missing credential or invalid setting, detected before any request is sent
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The API answered with something other than `200 OK`
    #[error("Failed to make HTTP call for page={page}, status={status}")]
    Fetch { page: u32, status: u16 },

    /// The response body was not JSON, or did not have the expected shape
    #[error("Failed to decode response for page={page}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },

    /// Transport-level failure (DNS, connect, TLS, reading the body)
    #[error("HTTP request failed")]
    Request(#[from] reqwest::Error),

    /// Writing the rendered records failed
    #[error("Failed to write output")]
    Output(#[from] std::io::Error),
}

impl ObservationsError {
    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Page number the error is attached to, if it happened mid-run
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Fetch { page, .. } | Self::Decode { page, .. } => Some(*page),
            _ => None,
        }
    }
}

/// Type alias for Results using ObservationsError
pub type Result<T> = std::result::Result<T, ObservationsError>;
