use futures_util::StreamExt;
use reev_logging::{reev_debug, reev_warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use url::Url;

use crate::{ClientConfig, ClientError, FailureKind, HttpBody};

/// Header carrying the CSRF token (`X-CSRFToken` on the wire).
pub const CSRF_HEADER: &str = "x-csrftoken";

/// One HTTP GET against the API, relative to the configured base URL.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<HttpBody, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
    max_body_bytes: u64,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.resolved_base_url()?;

        let mut headers = HeaderMap::new();
        if let Some(token) = config.csrf_token.as_deref() {
            let mut value = HeaderValue::from_str(token).map_err(|err| {
                ClientError::new(FailureKind::InvalidInput, format!("csrf token: {err}"))
            })?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(CSRF_HEADER), value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            max_body_bytes: config.max_body_bytes,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, format!("{path}: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<HttpBody, ClientError> {
        let url = self.endpoint(path, query)?;
        reev_debug!("GET {}", url.path());

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            reev_warn!("GET {} failed with {}", url.path(), status);
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_body_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_body_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_body_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_body_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        reev_debug!("GET {} -> {} bytes", url.path(), bytes.len());

        Ok(HttpBody {
            url: final_url,
            content_type,
            bytes,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ClientError::new(FailureKind::Decode, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
