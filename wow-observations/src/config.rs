use url::Url;

use crate::error::{ObservationsError, Result};
use crate::pagination::Pagination;
use crate::DEFAULT_BASE_URL;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "API_KEY";
/// Optional override for the observations endpoint
pub const BASE_URL_VAR: &str = "WOW_BASE_URL";
/// Optional override for the User-Agent header
pub const USER_AGENT_VAR: &str = "WOW_USER_AGENT";

/// Number of observation field values printed per record by default
pub const DEFAULT_FIELDS_SHOWN: usize = 2;

/// API key, sent verbatim as the `Authorization` header value
#[derive(Clone)]
pub struct ApiKey {
    pub key: String,
}

impl ApiKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self { key: key.into() }
    }

    /// Value for the `Authorization` header, without any scheme prefix
    pub fn header_value(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Everything a run needs, resolved once at startup
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub api_key: ApiKey,
    /// Full URL of the observations listing
    pub base_url: String,
    pub pagination: Pagination,
    /// How many observation field values to print per record
    pub max_fields_shown: usize,
    /// User agent for HTTP requests
    pub user_agent: String,
}

impl FetcherConfig {
    /// Create a configuration with default endpoint and paging
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            base_url: DEFAULT_BASE_URL.to_string(),
            pagination: Pagination::default(),
            max_fields_shown: DEFAULT_FIELDS_SHOWN,
            user_agent: default_user_agent(),
        }
    }

    /// Read configuration from the process environment.
    ///
    /// `API_KEY` is required; an absent or empty value is a configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`FetcherConfig::from_env`], reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ObservationsError::configuration(format!(
                    "Env var {API_KEY_VAR} must be supplied"
                ))
            })?;

        let mut config = Self::new(api_key);
        if let Some(url) = lookup(BASE_URL_VAR).filter(|v| !v.is_empty()) {
            config = config.with_base_url(url);
        }
        if let Some(ua) = lookup(USER_AGENT_VAR).filter(|v| !v.is_empty()) {
            config = config.with_user_agent(ua);
        }
        config.validate()?;
        Ok(config)
    }

    /// Point the client at a different endpoint
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set number of records per page
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.pagination.page_size = page_size;
        self
    }

    /// Set the maximum number of pages fetched in one run
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.pagination.max_pages = max_pages;
        self
    }

    /// Set how many observation field values are printed per record
    pub fn with_max_fields_shown(mut self, max_fields_shown: usize) -> Self {
        self.max_fields_shown = max_fields_shown;
        self
    }

    /// Set custom user agent
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check settings that would otherwise only fail once requests start
    pub fn validate(&self) -> Result<()> {
        if self.api_key.key.is_empty() {
            return Err(ObservationsError::configuration(format!(
                "Env var {API_KEY_VAR} must be supplied"
            )));
        }
        if self.pagination.page_size == 0 {
            return Err(ObservationsError::configuration(
                "page size must be at least 1",
            ));
        }
        if self.pagination.max_pages == 0 {
            return Err(ObservationsError::configuration(
                "max pages must be at least 1",
            ));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            ObservationsError::configuration(format!("invalid base URL {:?}: {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ObservationsError::configuration(format!(
                "base URL must be http or https, got {:?}",
                url.scheme()
            )));
        }
        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("wow-observations/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = FetcherConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ObservationsError::Configuration { .. }));
        assert!(err.to_string().contains("API_KEY must be supplied"));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let err = FetcherConfig::from_lookup(lookup_from(&[("API_KEY", "")])).unwrap_err();
        assert!(matches!(err, ObservationsError::Configuration { .. }));
    }

    #[test]
    fn defaults_from_environment() {
        let config = FetcherConfig::from_lookup(lookup_from(&[("API_KEY", "abc123")])).unwrap();
        assert_eq!(config.api_key.header_value(), "abc123");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.pagination, Pagination::new(3, 3));
        assert_eq!(config.max_fields_shown, 2);
        assert!(config.user_agent.starts_with("wow-observations/"));
    }

    #[test]
    fn overrides_from_environment() {
        let config = FetcherConfig::from_lookup(lookup_from(&[
            ("API_KEY", "abc123"),
            ("WOW_BASE_URL", "http://localhost:8080/wow-observations"),
            ("WOW_USER_AGENT", "orchid-survey/2.0"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/wow-observations");
        assert_eq!(config.user_agent, "orchid-survey/2.0");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = FetcherConfig::from_lookup(lookup_from(&[
            ("API_KEY", "abc123"),
            ("WOW_BASE_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("invalid base URL"));

        let err = FetcherConfig::new("abc123")
            .with_base_url("ftp://example.org/obs")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn zero_paging_values_are_rejected() {
        assert!(FetcherConfig::new("k").with_page_size(0).validate().is_err());
        assert!(FetcherConfig::new("k").with_max_pages(0).validate().is_err());
        assert!(FetcherConfig::new("k").with_max_fields_shown(0).validate().is_ok());
    }

    #[test]
    fn debug_output_hides_key() {
        let config = FetcherConfig::new("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
