use std::fmt;
use std::time::Duration;

use url::Url;

use crate::{ClientError, FailureKind};

/// Base URL used when a client gets no override; fixed at build time.
pub const DEFAULT_API_BASE_URL: &str = match option_env!("REEV_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8080/internal/",
};

#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub csrf_token: Option<String>,
    /// `None` leaves the platform default in place.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub max_body_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            csrf_token: None,
            connect_timeout: None,
            request_timeout: None,
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// The override if present, else [`DEFAULT_API_BASE_URL`], normalized.
    pub fn resolved_base_url(&self) -> Result<Url, ClientError> {
        normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("csrf_token", &self.csrf_token.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

/// Parses an absolute base URL and makes sure it ends with `/`, so endpoint
/// paths resolve below it instead of replacing its last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed)
        .map_err(|err| ClientError::new(FailureKind::InvalidUrl, format!("{trimmed}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::new(
            FailureKind::InvalidUrl,
            format!("{trimmed}: cannot be used as a base url"),
        ));
    }
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
