//! Byte-range access to a remote resource.
//!
//! The duration estimator only needs two operations: the resource's total
//! length and a small byte range. `ByteRangeSource` captures that contract;
//! `HttpByteSource` implements it with libcurl (via the `curl` crate) using
//! a HEAD probe and Range GETs.

mod content_range;
mod head;
mod range;

pub use content_range::{parse_content_range, ContentRange};
pub use head::HeadProbe;

use crate::config::RmdConfig;
use crate::retry::{run_with_retry, RetryPolicy};
use std::fmt;
use std::time::Duration;

/// Error from the HTTP transport. Surfaced unchanged to callers; the retry
/// layer classifies it to decide whether another attempt is worthwhile.
#[derive(Debug)]
pub enum TransportError {
    /// The locator could not be parsed as a URL.
    InvalidUrl(url::ParseError),
    /// The locator parsed, but its scheme is not http/https.
    UnsupportedScheme(String),
    /// Curl reported an error (timeout, connection, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http { code: u32, url: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::InvalidUrl(e) => write!(f, "invalid URL: {}", e),
            TransportError::UnsupportedScheme(s) => {
                write!(f, "unsupported URL scheme: {}", s)
            }
            TransportError::Curl(e) => write!(f, "{}", e),
            TransportError::Http { code, url } => write!(f, "HTTP {} from {}", code, url),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::InvalidUrl(e) => Some(e),
            TransportError::Curl(e) => Some(e),
            TransportError::UnsupportedScheme(_) | TransportError::Http { .. } => None,
        }
    }
}

/// Bytes returned by one range read, plus the Content-Range the server
/// declared for them (if any). Owned by the caller that issued the fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub bytes: Vec<u8>,
    pub range: Option<ContentRange>,
}

/// A resource that can report its total length and serve byte ranges.
///
/// Implementations issue at most one request per call; the estimator relies
/// on that to bound its request count.
pub trait ByteRangeSource {
    /// Issues a metadata-only probe; `None` when the server does not report
    /// a length.
    fn total_length(&self) -> Result<Option<u64>, TransportError>;

    /// Reads bytes `[start, end]` inclusive, or `[start, end-of-resource]`
    /// when `end` is `None`.
    fn read_range(&self, start: u64, end: Option<u64>) -> Result<FetchResult, TransportError>;
}

/// Per-request knobs for the curl handles, derived from config.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: Option<String>,
}

impl HttpOptions {
    pub fn from_config(cfg: &RmdConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            request_timeout: Duration::from_secs(cfg.request_timeout_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// HTTP implementation of `ByteRangeSource`: HEAD for the length probe,
/// Range GET for byte windows, optional retry with backoff around each
/// request.
#[derive(Debug)]
pub struct HttpByteSource {
    url: String,
    options: HttpOptions,
    retry: Option<RetryPolicy>,
}

impl HttpByteSource {
    /// Validates the locator and builds a source using the given config.
    pub fn new(url: &str, cfg: &RmdConfig) -> Result<Self, TransportError> {
        let parsed = url::Url::parse(url).map_err(TransportError::InvalidUrl)?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(TransportError::UnsupportedScheme(other.to_string())),
        }
        Ok(Self {
            url: url.to_string(),
            options: HttpOptions::from_config(cfg),
            retry: cfg.retry.as_ref().map(RetryPolicy::from_config),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw HEAD probe result (length + range support), for diagnostics.
    pub fn head(&self) -> Result<HeadProbe, TransportError> {
        self.request(|| head::probe(&self.url, &self.options))
    }

    fn request<T>(
        &self,
        f: impl FnMut() -> Result<T, TransportError>,
    ) -> Result<T, TransportError> {
        match &self.retry {
            Some(policy) => run_with_retry(policy, f),
            None => {
                let mut f = f;
                f()
            }
        }
    }
}

impl ByteRangeSource for HttpByteSource {
    fn total_length(&self) -> Result<Option<u64>, TransportError> {
        let probe = match self.head() {
            Ok(p) => p,
            // Servers that block HEAD outright cannot tell us a length;
            // the estimator treats that as "unknown", not as a failure.
            Err(TransportError::Http { code: 405 | 501, .. }) => {
                tracing::debug!("HEAD not allowed by server; length unknown");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if !probe.accept_ranges {
            tracing::debug!("server does not advertise Accept-Ranges: bytes");
        }
        Ok(probe.content_length)
    }

    fn read_range(&self, start: u64, end: Option<u64>) -> Result<FetchResult, TransportError> {
        self.request(|| range::fetch_range(&self.url, start, end, &self.options))
    }
}
