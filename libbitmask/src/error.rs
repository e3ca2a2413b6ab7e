use crate::{rect::Rect, serde};
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Possible `libbitmask` errors
pub enum Error {
    /// Error returned if the packed storage cannot be allocated
    ///
    /// A mask that fails to grow is left unusable, callers should treat this as fatal.
    #[error("unable to allocate mask storage of {words} words")]
    OutOfMemory {
        /// Number of 32-bit words requested
        words: usize,
    },
    /// Error returned if the checksum of a serialized mask does not match its payload
    #[error("mask payload is corrupt. ecc: {expected:#06x}, computed: {actual:#06x}")]
    ChecksumMismatch {
        /// Checksum stored alongside the payload
        expected: u16,
        /// Checksum computed over the decoded payload
        actual: u16,
    },
    /// Error returned if an element does not describe a mask
    #[error("malformed mask document")]
    MalformedDocument(#[from] serde::error::Error),
    /// Error returned if a region's pixels do not match its rectangle
    #[error("region {rect} cannot hold {len} pixels")]
    RegionSize {
        /// The rectangle of the region
        rect: Rect,
        /// Number of pixels supplied
        len: usize,
    },
    /// Error returned if an image does not fit the mask's coordinate range
    #[error("image of {width}x{height} pixels at {origin:?} exceeds the coordinate range")]
    ImageTooLarge {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Coordinates of the image's first pixel
        origin: (i32, i32),
    },
    /// Error returned if a region is too large to render as an image
    #[error("region {rect} does not fit an image")]
    RegionTooLarge {
        /// The rectangle of the region
        rect: Rect,
    },
    /// Error returned if document text cannot be parsed into elements
    #[error("unable to parse document: {0}")]
    Parse(String),
}
