use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::debug;

use crate::config::FetcherConfig;
use crate::error::{ObservationsError, Result};
use crate::models::ApiResponse;
use crate::pagination::PageRequest;

/// # WOW Observations Client
///
/// Thin client for the Wild Orchid Watch observations facade. It issues one
/// `GET` per page and decodes the listing into typed records.
///
/// The API key is sent verbatim in the `Authorization` header, with no
/// scheme prefix.
///
/// ## Usage
///
/// ```rust,no_run
/// use wow_observations::{FetcherConfig, ObservationsClient, PageRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = FetcherConfig::from_env()?;
///     let client = ObservationsClient::new(&config)?;
///
///     let page = client.fetch_page(PageRequest::first(3)).await?;
///     println!("{} observations in total", page.total_results);
///     for obs in &page.results {
///         println!(
///             "{} at {}",
///             obs.species_guess.as_deref().unwrap_or("unknown"),
///             obs.display_location().unwrap_or("unknown")
///         );
///     }
///     Ok(())
/// }
/// ```
pub struct ObservationsClient {
    http: reqwest::Client,
    base_url: String,
    authorization: HeaderValue,
}

impl std::fmt::Debug for ObservationsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservationsClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ObservationsClient {
    /// Create a client from a resolved configuration
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()?;
        Self::with_http_client(config, http)
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_http_client(config: &FetcherConfig, http: reqwest::Client) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(config.api_key.header_value())
            .map_err(|_| {
                ObservationsError::configuration("API key contains characters not allowed in a header")
            })?;
        authorization.set_sensitive(true);

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            authorization,
        })
    }

    /// Fetch and decode a single page.
    ///
    /// Anything other than `200 OK` is returned as [`ObservationsError::Fetch`]
    /// without reading the body further; a body that doesn't match
    /// [`ApiResponse`] is [`ObservationsError::Decode`].
    pub async fn fetch_page(&self, request: PageRequest) -> Result<ApiResponse> {
        let page = request.page_number;
        debug!(page, per_page = request.page_size, url = %self.base_url, "requesting page");

        let response = self
            .http
            .get(&self.base_url)
            .query(&request.query_params())
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(page, status = status.as_u16(), "page request rejected");
            return Err(ObservationsError::Fetch {
                page,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let listing: ApiResponse = serde_json::from_str(&body)
            .map_err(|source| ObservationsError::Decode { page, source })?;

        debug!(
            page,
            total_results = listing.total_results,
            results = listing.results.len(),
            "page decoded"
        );
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_omits_credentials() {
        let config = FetcherConfig::new("secret-key");
        let client = ObservationsClient::new(&config).unwrap();

        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("ObservationsClient"));
        assert!(debug_str.contains("wildorchidwatch.org"));
        assert!(!debug_str.contains("secret-key"));
    }

    #[test]
    fn header_unsafe_key_is_a_configuration_error() {
        let config = FetcherConfig::new("bad\nkey");
        let err = ObservationsClient::new(&config).unwrap_err();
        assert!(matches!(err, ObservationsError::Configuration { .. }));
    }
}
