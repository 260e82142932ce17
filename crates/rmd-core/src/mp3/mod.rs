//! MPEG audio binary formats, decoded read-only: the ID3v2 tag header and
//! the 4-byte frame header.

pub mod frame;
pub mod id3v2;
pub mod synchsafe;

pub use frame::{parse_frame_header, FrameError, FrameHeader};
pub use id3v2::{read_id3v2_header, Id3Scan, Id3v2Header};
pub use synchsafe::read_synchsafe_integer;
