//! Integration tests: duration estimation against a local HTTP range server.
//!
//! Builds synthetic CBR MP3 bodies (optional ID3v2 tag, one real frame
//! header, filler), serves them with various server behaviors, and checks
//! the estimated durations and error paths.

mod common;

use common::range_server::{self, RangeServerOptions};
use rmd_core::config::RmdConfig;
use rmd_core::estimate::{estimate_duration, estimate_duration_url, EstimateError};
use rmd_core::fetch::HttpByteSource;
use rmd_core::mp3::FrameError;

/// MPEG 1 Layer III, 128 kbps, stereo.
const FRAME_128K_STEREO: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
/// Same, mono (channel mode 3).
const FRAME_128K_MONO: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC0];

fn id3v2_header(payload_len: u32) -> Vec<u8> {
    let mut header = b"ID3".to_vec();
    header.extend_from_slice(&[4, 0, 0]);
    header.extend_from_slice(&[
        ((payload_len >> 21) & 0x7F) as u8,
        ((payload_len >> 14) & 0x7F) as u8,
        ((payload_len >> 7) & 0x7F) as u8,
        (payload_len & 0x7F) as u8,
    ]);
    header
}

/// A stream that starts directly with a frame header, padded to `total_len`.
fn plain_stream(frame: [u8; 4], total_len: usize) -> Vec<u8> {
    let mut body = frame.to_vec();
    body.resize(total_len, 0x55);
    body
}

/// A stream with an ID3v2 tag of `payload_len` payload bytes, then a frame.
fn tagged_stream(payload_len: u32, frame: [u8; 4], total_len: usize) -> Vec<u8> {
    let mut body = id3v2_header(payload_len);
    body.resize(10 + payload_len as usize, 0);
    body.extend_from_slice(&frame);
    body.resize(total_len, 0x55);
    body
}

fn source_for(url: &str) -> HttpByteSource {
    HttpByteSource::new(url, &RmdConfig::default()).expect("valid URL")
}

#[test]
fn estimates_untagged_stereo_stream() {
    // 1_000_000 bytes at 128 kbps (16000 bytes/s) -> 62 seconds.
    let url = range_server::start(plain_stream(FRAME_128K_STEREO, 1_000_000));
    assert_eq!(estimate_duration(&source_for(&url)).unwrap(), 62);
}

#[test]
fn estimates_mono_stream_at_double() {
    let url = range_server::start(plain_stream(FRAME_128K_MONO, 1_000_000));
    assert_eq!(estimate_duration(&source_for(&url)).unwrap(), 124);
}

#[test]
fn estimates_tagged_stream_past_the_tag() {
    // Frame offset 16000: (1_000_000 - 16000) / 16000 = 61.5 -> 61.
    let url = range_server::start(tagged_stream(15990, FRAME_128K_STEREO, 1_000_000));
    assert_eq!(estimate_duration(&source_for(&url)).unwrap(), 61);
}

#[test]
fn estimate_by_url_convenience() {
    let url = range_server::start(plain_stream(FRAME_128K_STEREO, 1_000_000));
    assert_eq!(
        estimate_duration_url(&url, &RmdConfig::default()).unwrap(),
        62
    );
}

#[test]
fn head_blocked_uses_declared_content_range() {
    let url = range_server::start_with_options(
        plain_stream(FRAME_128K_STEREO, 1_000_000),
        RangeServerOptions {
            head_allowed: false,
            support_ranges: true,
            send_content_range: true,
        },
    );
    assert_eq!(estimate_duration(&source_for(&url)).unwrap(), 62);
}

#[test]
fn missing_content_range_falls_back_to_head() {
    let url = range_server::start_with_options(
        plain_stream(FRAME_128K_STEREO, 1_000_000),
        RangeServerOptions {
            head_allowed: true,
            support_ranges: true,
            send_content_range: false,
        },
    );
    assert_eq!(estimate_duration(&source_for(&url)).unwrap(), 62);
}

#[test]
fn unknown_length_everywhere_yields_zero() {
    let url = range_server::start_with_options(
        plain_stream(FRAME_128K_STEREO, 1_000_000),
        RangeServerOptions {
            head_allowed: false,
            support_ranges: true,
            send_content_range: false,
        },
    );
    assert_eq!(estimate_duration(&source_for(&url)).unwrap(), 0);
}

#[test]
fn server_ignoring_ranges_still_estimates() {
    // 200 + full body: the parsers only consume the leading bytes.
    let url = range_server::start_with_options(
        plain_stream(FRAME_128K_STEREO, 100_000),
        RangeServerOptions {
            head_allowed: true,
            support_ranges: false,
            send_content_range: true,
        },
    );
    // 100_000 / 16000 = 6.25 -> 6.
    assert_eq!(estimate_duration(&source_for(&url)).unwrap(), 6);
}

#[test]
fn non_mpeg_body_fails_with_frame_error() {
    let url = range_server::start(vec![0u8; 4096]);
    match estimate_duration(&source_for(&url)) {
        Err(EstimateError::Frame(FrameError::MissingSync { offset })) => assert_eq!(offset, 0),
        other => panic!("expected MissingSync, got {:?}", other),
    }
}

#[test]
fn non_http_scheme_is_rejected() {
    let err = HttpByteSource::new("ftp://example.com/a.mp3", &RmdConfig::default()).unwrap_err();
    assert!(err.to_string().contains("unsupported URL scheme"));
}

#[test]
fn unparseable_url_is_rejected() {
    let err = HttpByteSource::new("not a url", &RmdConfig::default()).unwrap_err();
    assert!(err.to_string().contains("invalid URL"));
}
