pub(crate) mod crc;
pub(crate) mod document;
pub(crate) mod error;
mod mask;
mod parse;

pub(crate) use parse::{parse_document, parse_integers};

// Names used by the serialized mask
const RECTANGLE: &str = "rectangle";
const BOUNDING_BOX: &str = "boundingBox";
const SIZE: &str = "size";
const MASK: &str = "mask";
const OUTSIDE: &str = "outside";
const ECC: &str = "ecc";
const CCITT_PREFIX: &str = "ccitt:";
/// Root element name used for standalone mask documents
pub const DOCUMENT_ROOT: &str = "bitmask";
