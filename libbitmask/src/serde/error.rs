use thiserror::Error;

/// Reasons an element does not describe a valid mask
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required child element is absent
    #[error("element '{0}' not found")]
    MissingElement(&'static str),
    /// A required attribute is absent
    #[error("attribute '{0}' not found")]
    MissingAttribute(&'static str),
    /// An element does not hold the expected number of integers
    #[error("element '{element}' holds '{value}', expected {expected} integers")]
    InvalidIntegers {
        /// Name of the element
        element: &'static str,
        /// Its text content
        value: String,
        /// Number of integers required
        expected: usize,
    },
    /// An integer does not fit the field it is read into
    #[error("element '{element}' holds out of range value {value}")]
    OutOfRange {
        /// Name of the element
        element: &'static str,
        /// The offending value
        value: i64,
    },
    /// The checksum attribute is not a `ccitt:` checksum
    #[error("attribute 'ecc' holds unsupported checksum '{0}'")]
    InvalidChecksum(String),
    /// The payload is not valid base-64
    #[error("invalid base64 payload")]
    InvalidPayload(#[from] base64::DecodeError),
    /// Storage rectangle, words per row and row count disagree
    #[error("storage rectangle {rect} does not match {words_per_row} words by {rows} rows")]
    InconsistentSize {
        /// The storage rectangle as written
        rect: String,
        /// Words per row as written
        words_per_row: usize,
        /// Rows as written
        rows: usize,
    },
    #[error("bounding box {bounding_box} exceeds storage rectangle {rect}")]
    /// The bounding box is not inside the storage rectangle
    BoundingBoxOutsideStorage {
        /// The bounding box as written
        bounding_box: String,
        /// The storage rectangle as written
        rect: String,
    },
    /// The decoded payload does not hold one word per storage cell
    #[error("payload holds {actual} bytes, expected {expected}")]
    PayloadLength {
        /// Bytes required by the declared size
        expected: usize,
        /// Bytes decoded
        actual: usize,
    },
}
