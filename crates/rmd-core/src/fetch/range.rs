//! Single HTTP Range GET collecting the body into memory.

use super::content_range::parse_content_range;
use super::{FetchResult, HttpOptions, TransportError};
use std::str;

/// Issues a GET with a `Range: bytes=start-end` header and returns the body
/// plus the parsed Content-Range, if the server declared one.
///
/// A server that ignores the range responds 200 with the full body; the
/// caller still only consumes the leading bytes it asked for.
pub(super) fn fetch_range(
    url: &str,
    start: u64,
    end: Option<u64>,
    options: &HttpOptions,
) -> Result<FetchResult, TransportError> {
    let mut body: Vec<u8> = Vec::new();
    let mut content_range: Option<String> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(TransportError::Curl)?;
    easy.follow_location(true).map_err(TransportError::Curl)?;
    easy.connect_timeout(options.connect_timeout)
        .map_err(TransportError::Curl)?;
    easy.timeout(options.request_timeout)
        .map_err(TransportError::Curl)?;
    if let Some(agent) = &options.user_agent {
        easy.useragent(agent).map_err(TransportError::Curl)?;
    }

    let range_str = match end {
        Some(end) => format!("{}-{}", start, end),
        None => format!("{}-", start),
    };
    easy.range(&range_str).map_err(TransportError::Curl)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    if let Some((name, value)) = line.split_once(':') {
                        if name.trim().eq_ignore_ascii_case("content-range") {
                            content_range = Some(value.trim().to_string());
                        }
                    }
                }
                true
            })
            .map_err(TransportError::Curl)?;
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
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
    if code == 200 && end.is_some() {
        tracing::debug!("server ignored range {} and returned the full body", range_str);
    }

    let range = content_range.as_deref().and_then(parse_content_range);
    Ok(FetchResult { bytes: body, range })
}
