//! ID3v2 tag header detection.
//!
//! ID3v2 header layout:
//! - Bytes 0-2: "ID3"
//! - Byte 3: version major
//! - Byte 4: version minor
//! - Byte 5: flags
//! - Bytes 6-9: tag payload size (synchsafe, 28 bits)

use super::synchsafe::read_synchsafe_integer;
use crate::fetch::FetchResult;

const TAG_MARKER: &[u8; 3] = b"ID3";
const TAG_HEADER_SIZE: u32 = 10;

/// A recognized ID3v2 tag header. `size` is the tag payload length; the
/// audio stream starts at `size + header_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2Header {
    pub size: u32,
    pub header_size: u32,
}

/// Outcome of scanning the first bytes of a resource: the tag header when
/// one is present (absence is not a zero-length header), plus the total
/// size the range response declared, passed through unchanged.
#[derive(Debug, Clone)]
pub struct Id3Scan {
    pub header: Option<Id3v2Header>,
    pub total_content_size: Option<u64>,
}

impl Id3Scan {
    /// Offset of the first audio frame: end of the tag, or 0 without one.
    pub fn first_frame_offset(&self) -> u64 {
        match &self.header {
            Some(h) => u64::from(h.size) + u64::from(h.header_size),
            None => 0,
        }
    }
}

/// Scans a fetch covering the start of the resource for an ID3v2 tag.
///
/// Expects at least the first 10 bytes; shorter data (a tiny resource)
/// yields "no tag" rather than a partial decode.
pub fn read_id3v2_header(fetch: &FetchResult) -> Id3Scan {
    let total_content_size = fetch.range.as_ref().and_then(|r| r.total_size);
    let data = &fetch.bytes;

    let header = if data.len() >= 10 && &data[0..3] == TAG_MARKER {
        Some(Id3v2Header {
            header_size: TAG_HEADER_SIZE,
            size: read_synchsafe_integer(data, 4, 6),
        })
    } else {
        None
    };

    Id3Scan {
        header,
        total_content_size,
    }
}
