//! HTTP HEAD probe for the resource's total length.
//!
//! Uses the curl crate (libcurl) to fetch response headers and read
//! `Content-Length` and `Accept-Ranges: bytes`.

use super::{HttpOptions, TransportError};
use std::str;

/// Result of a HEAD request.
#[derive(Debug, Clone)]
pub struct HeadProbe {
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// True if server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
}

/// Performs a HEAD request and returns parsed metadata. Follows redirects.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub(super) fn probe(url: &str, options: &HttpOptions) -> Result<HeadProbe, TransportError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(TransportError::Curl)?;
    easy.nobody(true).map_err(TransportError::Curl)?; // HEAD request
    easy.follow_location(true).map_err(TransportError::Curl)?;
    easy.connect_timeout(options.connect_timeout)
        .map_err(TransportError::Curl)?;
    easy.timeout(options.request_timeout)
        .map_err(TransportError::Curl)?;
    if let Some(agent) = &options.user_agent {
        easy.useragent(agent).map_err(TransportError::Curl)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(TransportError::Curl)?;
        transfer.perform().map_err(TransportError::Curl)?;
    }

    let code = easy.response_code().map_err(TransportError::Curl)?;
    if !(200..300).contains(&code) {
        return Err(TransportError::Http {
            code,
            url: url.to_string(),
        });
    }

    Ok(parse_head_lines(&headers))
}

/// Parse collected response header lines into a HeadProbe.
fn parse_head_lines(lines: &[String]) -> HeadProbe {
    let mut content_length = None;
    let mut accept_ranges = false;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("accept-ranges") {
                accept_ranges = value.eq_ignore_ascii_case("bytes");
            }
        }
    }

    HeadProbe {
        content_length,
        accept_ranges,
    }
}
