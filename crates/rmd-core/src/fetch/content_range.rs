//! Parse the Content-Range response header value.

/// Declared range of a partial response: `bytes <start>-<end>/<total>`.
/// `total_size` is `None` when the server reported `*` for the full size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRange {
    pub unit: String,
    /// Start offset (inclusive).
    pub start: u64,
    /// End offset (inclusive).
    pub end: u64,
    pub total_size: Option<u64>,
}

/// Parses a Content-Range header value like `bytes 0-9/12345`.
///
/// Returns `None` for anything that does not carry a usable start-end pair,
/// including the unsatisfied-range form `bytes */12345`.
pub fn parse_content_range(value: &str) -> Option<ContentRange> {
    let (unit, rest) = value.trim().split_once(' ')?;
    if unit.is_empty() {
        return None;
    }
    let (range_part, total_part) = rest.trim().split_once('/')?;

    let total_size = match total_part.trim() {
        "*" => None,
        t => Some(t.parse::<u64>().ok()?),
    };

    let (start_str, end_str) = range_part.trim().split_once('-')?;
    let start = start_str.parse::<u64>().ok()?;
    let end = end_str.parse::<u64>().ok()?;

    Some(ContentRange {
        unit: unit.to_string(),
        start,
        end,
        total_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_form() {
        let r = parse_content_range("bytes 0-9/12345").unwrap();
        assert_eq!(r.unit, "bytes");
        assert_eq!(r.start, 0);
        assert_eq!(r.end, 9);
        assert_eq!(r.total_size, Some(12345));
    }

    #[test]
    fn parse_unknown_total() {
        let r = parse_content_range("bytes 100-103/*").unwrap();
        assert_eq!(r.start, 100);
        assert_eq!(r.end, 103);
        assert_eq!(r.total_size, None);
    }

    #[test]
    fn parse_unsatisfied_range_is_unusable() {
        assert!(parse_content_range("bytes */12345").is_none());
    }

    #[test]
    fn parse_garbage() {
        assert!(parse_content_range("").is_none());
        assert!(parse_content_range("bytes").is_none());
        assert!(parse_content_range("bytes 0-9").is_none());
        assert!(parse_content_range("bytes x-y/100").is_none());
    }

    #[test]
    fn parse_tolerates_surrounding_whitespace() {
        let r = parse_content_range("  bytes 5-8/90  ").unwrap();
        assert_eq!(r.start, 5);
        assert_eq!(r.end, 8);
        assert_eq!(r.total_size, Some(90));
    }
}
