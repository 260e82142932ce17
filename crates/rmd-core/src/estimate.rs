//! Duration estimation from three small probes.
//!
//! One range fetch covers the first 10 bytes (enough for an ID3v2 tag
//! header), an optional HEAD probe resolves the total length when the range
//! response did not declare it, and an optional second range fetch reads the
//! first frame header past the tag. Never more than 3 requests per call.
//!
//! The estimate assumes constant bitrate: the first frame's bitrate is
//! taken as representative of the whole stream.

use crate::config::RmdConfig;
use crate::fetch::{ByteRangeSource, FetchResult, HttpByteSource, TransportError};
use crate::mp3::{parse_frame_header, read_id3v2_header, FrameError, FrameHeader};
use thiserror::Error;

/// Typed failure of a duration estimate. Transport errors are surfaced
/// unchanged; no partial result is ever returned.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    /// The frame header selects the free/reserved bitrate entry (0), which
    /// would make the duration computation divide by zero.
    #[error(
        "frame at byte {offset} has no usable bitrate \
         (version bits {version_bits}, layer bits {layer_bits}, bitrate index {bitrate_bits})"
    )]
    InvalidBitrate {
        offset: u64,
        version_bits: u8,
        layer_bits: u8,
        bitrate_bits: u8,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Estimates the playback duration of the resource in whole seconds.
///
/// Returns 0 when the total length cannot be determined by any means; that
/// is a defined degenerate result, not an error.
pub fn estimate_duration<S: ByteRangeSource>(source: &S) -> Result<u64, EstimateError> {
    let first = source.read_range(0, Some(9))?;
    let scan = read_id3v2_header(&first);

    let total_content_size = match scan.total_content_size {
        Some(n) => n,
        None => match source.total_length()? {
            Some(n) => n,
            None => {
                tracing::debug!("total length unknown; reporting zero duration");
                return Ok(0);
            }
        },
    };

    let first_frame_offset = scan.first_frame_offset();
    let frame = read_frame_at(source, &first, first_frame_offset)?;
    tracing::debug!(
        "first frame at byte {}: {} kbps, {} Hz, stereo={}",
        first_frame_offset,
        frame.bitrate_kbps,
        frame.sampling_rate_hz,
        frame.stereo
    );

    if frame.bitrate_kbps == 0 {
        return Err(EstimateError::InvalidBitrate {
            offset: first_frame_offset,
            version_bits: frame.mpeg_version_bits,
            layer_bits: frame.layer_bits,
            bitrate_bits: frame.bitrate_bits,
        });
    }

    let total_audio_data_size = total_content_size.saturating_sub(first_frame_offset);
    let bytes_per_second = u64::from(frame.bitrate_kbps) / 8 * 1000;
    let mut seconds = total_audio_data_size / bytes_per_second;
    if !frame.stereo {
        seconds *= 2;
    }
    Ok(seconds)
}

/// Estimates the duration of a remote MP3 by URL, using the HTTP source.
pub fn estimate_duration_url(url: &str, cfg: &RmdConfig) -> Result<u64, EstimateError> {
    let source = HttpByteSource::new(url, cfg).map_err(EstimateError::Transport)?;
    estimate_duration(&source)
}

/// Locates and decodes the first frame header without computing a duration.
/// Returns the frame's byte offset alongside the decoded header.
pub fn probe_first_frame<S: ByteRangeSource>(
    source: &S,
) -> Result<(u64, FrameHeader), EstimateError> {
    let first = source.read_range(0, Some(9))?;
    let scan = read_id3v2_header(&first);
    let offset = scan.first_frame_offset();
    let frame = read_frame_at(source, &first, offset)?;
    Ok((offset, frame))
}

/// Reads the frame header at `offset`, reusing the already-fetched leading
/// bytes when the stream starts with a frame (offset 0).
fn read_frame_at<S: ByteRangeSource>(
    source: &S,
    first: &FetchResult,
    offset: u64,
) -> Result<FrameHeader, EstimateError> {
    if offset == 0 {
        Ok(parse_frame_header(&first.bytes, 0)?)
    } else {
        let window = source.read_range(offset, Some(offset + 3))?;
        Ok(parse_frame_header(&window.bytes, offset)?)
    }
}
