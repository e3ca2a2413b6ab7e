use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, instrument, warn};

use super::{
    crc, document::Element, error::Error as DocumentError, parse_integers, BOUNDING_BOX,
    CCITT_PREFIX, ECC, MASK, OUTSIDE, RECTANGLE, SIZE,
};
use crate::{rect::Rect, BitGridMask, Error};

/// Reads `N` integers from the text of child `name`
fn integers<const N: usize>(parent: &Element, name: &'static str) -> Result<[i64; N], DocumentError> {
    let text = parent
        .child(name)
        .ok_or(DocumentError::MissingElement(name))?
        .text();
    parse_integers(&text)
        .and_then(|values| <[i64; N]>::try_from(values).ok())
        .ok_or_else(|| DocumentError::InvalidIntegers {
            element: name,
            value: text.trim().to_owned(),
            expected: N,
        })
}

fn narrow<T: TryFrom<i64>>(element: &'static str, value: i64) -> Result<T, DocumentError> {
    T::try_from(value).map_err(|_| DocumentError::OutOfRange { element, value })
}

fn rect(parent: &Element, name: &'static str) -> Result<Rect, DocumentError> {
    let [x1, y1, x2, y2] = integers::<4>(parent, name)?;
    Ok(Rect::new(
        narrow(name, x1)?,
        narrow(name, y1)?,
        narrow(name, x2)?,
        narrow(name, y2)?,
    ))
}

/// `1`, `t` and `true` read as true, anything else as false
fn parse_outside(value: &str) -> bool {
    matches!(value.trim(), "1" | "t" | "true")
}

fn parse_ecc(ecc: &str) -> Result<u16, DocumentError> {
    ecc.strip_prefix(CCITT_PREFIX)
        .and_then(|hex| u16::from_str_radix(hex.trim(), 16).ok())
        .ok_or_else(|| DocumentError::InvalidChecksum(ecc.to_owned()))
}

impl BitGridMask {
    /// Writes the mask into `element`
    ///
    /// Adds the `outside` attribute and the `rectangle`, `boundingBox` and `size` children. A
    /// mask with storage also gets a `mask` child holding the base-64 payload, and an `ecc`
    /// attribute with its CCITT checksum.
    pub fn to_xml(&self, element: &mut Element) {
        element.set_attribute(OUTSIDE, self.is_outside_selected().to_string());
        element.add_child(Element::with_text(
            RECTANGLE,
            self.storage_rect().unwrap_or_default().to_string(),
        ));
        element.add_child(Element::with_text(
            BOUNDING_BOX,
            self.bounding_box().to_string(),
        ));
        element.add_child(Element::with_text(
            SIZE,
            format!(
                "{} {} {}",
                self.words_per_row(),
                self.row_count(),
                self.count()
            ),
        ));
        if self.words().is_empty() {
            return;
        }
        let bytes: Vec<u8> = self.words().iter().flat_map(|w| w.to_le_bytes()).collect();
        element.add_child(Element::with_text(MASK, STANDARD.encode(&bytes)));
        element.set_attribute(ECC, format!("{CCITT_PREFIX}{:04x}", crc::ccitt(&bytes)));
    }

    /// Reads a mask written by [`Self::to_xml`]
    ///
    /// The checksum is verified whenever an `ecc` attribute is present. A stored count that
    /// disagrees with the payload is logged and replaced by the recomputed count.
    ///
    /// # Errors
    ///
    /// - [`Error::ChecksumMismatch`] if the payload does not match its checksum
    /// - [`Error::MalformedDocument`] if parts are missing or inconsistent
    pub fn from_xml(element: &Element) -> Result<Self, Error> {
        let outside = element
            .attribute(OUTSIDE)
            .map(parse_outside)
            .ok_or(DocumentError::MissingAttribute(OUTSIDE))?;
        let storage = rect(element, RECTANGLE)?;
        let bounding_box = rect(element, BOUNDING_BOX)?;
        let [words_per_row, rows, stored_count] = integers::<3>(element, SIZE)?;
        let words_per_row: usize = narrow(SIZE, words_per_row)?;
        let rows: usize = narrow(SIZE, rows)?;
        let stored_count: u64 = narrow(SIZE, stored_count)?;

        if words_per_row == 0 || rows == 0 {
            debug!("mask without storage, outside {outside}");
            return Ok(Self::from_parts(
                storage,
                bounding_box,
                (0, 0),
                outside,
                Vec::new(),
            ));
        }

        let payload: String = element
            .child(MASK)
            .ok_or(DocumentError::MissingElement(MASK))?
            .text()
            .split_whitespace()
            .collect();
        let bytes = STANDARD
            .decode(payload)
            .map_err(DocumentError::InvalidPayload)?;

        if let Some(ecc) = element.attribute(ECC) {
            let expected = parse_ecc(ecc)?;
            let actual = crc::ccitt(&bytes);
            if expected != actual {
                return Err(Error::ChecksumMismatch { expected, actual });
            }
        }

        let inconsistent = || DocumentError::InconsistentSize {
            rect: storage.to_string(),
            words_per_row,
            rows,
        };
        if storage.word_aligned() != storage
            || storage.words_per_row() != words_per_row
            || usize::try_from(storage.height()).ok() != Some(rows)
        {
            return Err(inconsistent().into());
        }
        if !storage.contains_rect(&bounding_box) {
            return Err(DocumentError::BoundingBoxOutsideStorage {
                bounding_box: bounding_box.to_string(),
                rect: storage.to_string(),
            }
            .into());
        }
        let expected = words_per_row
            .checked_mul(rows)
            .and_then(|words| words.checked_mul(4))
            .ok_or_else(inconsistent)?;
        if bytes.len() != expected {
            return Err(DocumentError::PayloadLength {
                expected,
                actual: bytes.len(),
            }
            .into());
        }

        let words = bytes
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        let mask = Self::from_parts(
            storage,
            bounding_box,
            (words_per_row, rows),
            outside,
            words,
        );
        if mask.count() != stored_count {
            warn!(
                "stored count {stored_count} does not match payload, using {}",
                mask.count()
            );
        }
        Ok(mask)
    }

    /// Renders the mask as a standalone document with root element `name`
    #[must_use]
    pub fn to_xml_string(&self, name: &str) -> String {
        let mut root = Element::new(name);
        self.to_xml(&mut root);
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{root}\n")
    }

    /// Parses a standalone document and reads the mask from its root element
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is not a document, otherwise see [`Self::from_xml`]
    pub fn from_xml_str(text: &str) -> Result<Self, Error> {
        let root: Element = text.parse()?;
        Self::from_xml(&root)
    }

    /// Tries to read a mask document from a reader
    ///
    /// # Errors
    ///
    /// This function will error if the reader fails, or if the document is not a valid mask
    pub fn from_reader(mut r: impl Read) -> Result<Self> {
        let mut text = String::new();
        r.read_to_string(&mut text).context("read mask document")?;
        Self::from_xml_str(&text).context("parse mask document")
    }

    /// Tries to read a mask from the document at the provided path
    ///
    /// # Errors
    ///
    /// This function will error if the file cannot be opened or does not hold a valid mask.
    /// See [`Self::from_xml`] for potential errors
    #[instrument(skip_all, fields(path = %filename.as_ref().display()))]
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(filename.as_ref())
            .with_context(|| format!("open {}", filename.as_ref().display()))?;
        Self::from_reader(file)
    }

    /// Attempts to save the mask as a document at the provided path
    ///
    /// # Errors
    ///
    /// This will error if unable to open and/or write to the provided filename
    #[instrument(skip_all, fields(path = %filename.as_ref().display()))]
    pub fn into_file(self, filename: impl AsRef<Path>) -> Result<()> {
        let f = File::options()
            .create(true)
            .write(true)
            .truncate(true)
            .open(filename)?;
        let mut f = BufWriter::new(f);
        f.write_all(self.to_xml_string(super::DOCUMENT_ROOT).as_bytes())
            .context("write mask document")?;
        f.flush().context("flush mask document")?;
        debug!("wrote mask with {} selected pixels", self.count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_parsing_is_lenient() {
        assert!(parse_outside("1"));
        assert!(parse_outside("t"));
        assert!(parse_outside("true"));
        assert!(!parse_outside("yes"));
        assert!(!parse_outside("false"));
    }

    #[test]
    fn ecc_requires_ccitt_prefix() {
        assert_eq!(parse_ecc("ccitt:29b1").unwrap(), 0x29b1);
        assert!(matches!(
            parse_ecc("md5:29b1"),
            Err(DocumentError::InvalidChecksum(_))
        ));
        assert!(parse_ecc("ccitt:zz").is_err());
    }
}
