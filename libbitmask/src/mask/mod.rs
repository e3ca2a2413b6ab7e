//! The packed-bit region mask
//!
//! A [`BitGridMask`] covers the whole (infinite) pixel plane. Pixels inside its storage
//! rectangle are held as packed bits, every other pixel reads as the mask's outside value.
//! Storage grows on demand and is only released by [`BitGridMask::clear`].

mod bbox;
mod iter;
mod ops;
mod pixels;
mod region;
mod storage;

pub use iter::SelectedPixels;
pub use region::{DrawMode, Region};

use crate::rect::Rect;
use region::RegionCache;

/// A 2D packed-bit mask with infinite logical extent
///
/// ## Layout
///
/// Bits are stored row-major in one contiguous buffer of `u32` words, `words_per_row` words per
/// row. The storage rectangle is always word-aligned on the X axis: its left edge is a multiple of
/// 32 and its width a multiple of 32. Within a word the most significant bit is the lowest
/// column.
///
/// ## Bounding box
///
/// The bounding box is the rectangle outside of which the outside value is authoritative. It is
/// always inside the storage rectangle and only ever grows during mutation, so it may be looser
/// than the smallest box around the interesting pixels. Use
/// [`BitGridMask::minimal_bounding_box`] for a tight box.
///
/// Every stored bit outside the bounding box holds the outside value, and the count is the number
/// of set pixels inside the bounding box.
#[derive(Debug, Default)]
pub struct BitGridMask {
    /// Storage rectangle, meaningful only while `words` is non-empty
    rect: Rect,
    bounding_box: Rect,
    words_per_row: usize,
    rows: usize,
    count: u64,
    outside: bool,
    words: Vec<u32>,
    cache: RegionCache,
}

impl BitGridMask {
    /// Creates an empty mask: no storage, nothing selected
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mask selecting exactly the pixels of `rect`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfMemory`] if the storage cannot be allocated
    pub fn filled(rect: impl Into<Rect>) -> Result<Self, crate::Error> {
        let mut mask = Self::new();
        mask.set_region(rect, DrawMode::Draw)?;
        Ok(mask)
    }

    /// Resets the mask to empty, releasing its storage
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of selected pixels inside the bounding box
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// The tracked bounding box
    ///
    /// This box only grows while the mask is mutated. It is `(0, 0, 0, 0)` for a mask without
    /// storage.
    #[must_use]
    pub const fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Whether pixels outside the storage read as selected
    #[must_use]
    pub const fn is_outside_selected(&self) -> bool {
        self.outside
    }

    /// The word-aligned rectangle for which bits are allocated, if any
    #[must_use]
    pub fn storage_rect(&self) -> Option<Rect> {
        self.has_storage().then_some(self.rect)
    }

    /// Number of storage words in each row
    #[must_use]
    pub const fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    /// Number of storage rows
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// No pixel is selected anywhere
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.outside && self.count == 0
    }

    /// Every pixel is selected
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.outside && (!self.has_storage() || self.count == self.bounding_box.area())
    }

    /// Reassembles a mask from stored parts
    ///
    /// Stored bits outside `bounding_box` are reset to `outside` and the count is recomputed.
    pub(crate) fn from_parts(
        rect: Rect,
        bounding_box: Rect,
        (words_per_row, rows): (usize, usize),
        outside: bool,
        words: Vec<u32>,
    ) -> Self {
        if words.is_empty() {
            return Self {
                outside,
                ..Self::default()
            };
        }
        let mut mask = Self {
            rect,
            bounding_box,
            words_per_row,
            rows,
            count: 0,
            outside,
            words,
            cache: RegionCache::default(),
        };
        mask.reset_outside_bounding_box(outside);
        mask.count = mask.compute_count();
        mask
    }

    pub(crate) fn words(&self) -> &[u32] {
        &self.words
    }

    /// Replaces the mask with a uniform plane of `value`
    fn set_uniform(&mut self, value: bool) {
        self.clear();
        self.outside = value;
    }
}

impl Clone for BitGridMask {
    fn clone(&self) -> Self {
        Self {
            rect: self.rect,
            bounding_box: self.bounding_box,
            words_per_row: self.words_per_row,
            rows: self.rows,
            count: self.count,
            outside: self.outside,
            words: self.words.clone(),
            cache: RegionCache::default(),
        }
    }
}

impl PartialEq for BitGridMask {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other)
    }
}

impl Eq for BitGridMask {}
