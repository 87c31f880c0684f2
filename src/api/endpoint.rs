//! Storefront API base URL and credentials.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::error::ReviewError;

/// Default HTTP timeout applied to storefront API calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Parsed base URL of the storefront API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: Url,
}

impl ApiEndpoint {
    /// Parses a base URL such as `https://shop.example.com/api`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidUrl`] when the value is not an absolute
    /// `http` or `https` URL.
    pub fn parse(input: &str) -> Result<Self, ReviewError> {
        let mut base =
            Url::parse(input.trim()).map_err(|error| ReviewError::InvalidUrl(error.to_string()))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(ReviewError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                base.scheme()
            )));
        }

        // A trailing slash makes `Url::join` append rather than replace the
        // last path segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self { base })
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves an API route relative to the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidUrl`] when the route cannot be joined.
    pub fn route(&self, route: &str) -> Result<Url, ReviewError> {
        self.base
            .join(route.trim_start_matches('/'))
            .map_err(|error| ReviewError::InvalidUrl(error.to_string()))
    }
}

/// Bearer token for the storefront API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ReviewError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReviewError::Configuration {
                message: "API token must not be blank".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Connection settings shared by the HTTP gateways.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Base URL of the storefront API.
    pub endpoint: ApiEndpoint,
    /// Optional bearer token.
    pub token: Option<ApiToken>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiSettings {
    /// Creates settings with the default timeout and no token.
    #[must_use]
    pub const fn new(endpoint: ApiEndpoint) -> Self {
        Self {
            endpoint,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: Option<ApiToken>) -> Self {
        self.token = token;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn build_client(&self) -> Result<Client, ReviewError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|error| ReviewError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })
    }
}
