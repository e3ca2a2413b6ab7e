use itertools::iproduct;
use tracing::trace;

use super::BitGridMask;
use crate::{
    bits::{advance, fill_word, word_start, ALL_SET},
    rect::Rect,
    Error,
};

impl BitGridMask {
    /// Union: selects every pixel selected in either mask
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if storage has to grow and cannot be allocated
    pub fn merge(&mut self, rhs: &Self) -> Result<(), Error> {
        if self.is_full() || rhs.is_full() {
            self.set_uniform(true);
            return Ok(());
        }
        if rhs.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            *self = rhs.clone();
            return Ok(());
        }
        if !self.rect.overlaps(&rhs.rect) {
            match (self.outside, rhs.outside) {
                (true, true) => {
                    self.set_uniform(true);
                    return Ok(());
                }
                (true, false) => return Ok(()),
                (false, true) => {
                    *self = rhs.clone();
                    return Ok(());
                }
                (false, false) => {}
            }
        }
        self.combine(rhs, |a, b| a | b)
    }

    /// Symmetric difference: selects pixels selected in exactly one of the masks
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if storage has to grow and cannot be allocated
    pub fn toggle(&mut self, rhs: &Self) -> Result<(), Error> {
        if self.is_empty() {
            *self = rhs.clone();
            return Ok(());
        }
        if self.is_full() {
            *self = rhs.clone();
            self.invert();
            return Ok(());
        }
        if rhs.is_empty() {
            return Ok(());
        }
        if rhs.is_full() {
            self.invert();
            return Ok(());
        }
        self.combine(rhs, |a, b| a ^ b)
    }

    /// Intersection: keeps only pixels selected in both masks
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if storage has to grow and cannot be allocated
    pub fn intersect(&mut self, rhs: &Self) -> Result<(), Error> {
        if self.is_empty() || rhs.is_full() {
            return Ok(());
        }
        if rhs.is_empty() {
            self.set_uniform(false);
            return Ok(());
        }
        if self.is_full() {
            *self = rhs.clone();
            return Ok(());
        }
        if !self.rect.overlaps(&rhs.rect) {
            match (self.outside, rhs.outside) {
                (false, false) => {
                    self.set_uniform(false);
                    return Ok(());
                }
                (false, true) => return Ok(()),
                (true, false) => {
                    *self = rhs.clone();
                    return Ok(());
                }
                (true, true) => {}
            }
        }
        self.combine(rhs, |a, b| a & b)
    }

    /// Flips every pixel of the plane
    ///
    /// The count becomes the bounding box area minus the previous count.
    pub fn invert(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        if self.has_storage() {
            self.count = self.bounding_box.area() - self.count;
        }
        self.outside = !self.outside;
        self.cache.invalidate();
    }

    /// Whether both masks select exactly the same pixels
    #[must_use]
    pub fn compare(&self, rhs: &Self) -> bool {
        self.outside == rhs.outside
            && self
                .footprint(rhs)
                .map_or(true, |area| {
                    words_of(area).all(|(x, y)| self.get_pixels(x, y) == rhs.get_pixels(x, y))
                })
    }

    /// Whether every pixel selected here is also selected in `other`
    ///
    /// A mask selecting everything outside its storage is only a subset of another such mask.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        if self.outside && !other.outside {
            return false;
        }
        self.footprint(other).map_or(true, |area| {
            words_of(area).all(|(x, y)| (!self.get_pixels(x, y) | other.get_pixels(x, y)) == ALL_SET)
        })
    }

    /// Union of both storage rectangles
    fn footprint(&self, other: &Self) -> Option<Rect> {
        match (self.storage_rect(), other.storage_rect()) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, b) => a.or(b),
        }
    }

    /// Applies `op` to every stored word against the matching word of `rhs`
    ///
    /// Storage grows to cover `rhs` first, keeping this mask's outside value for new cells, so
    /// every pixel of the plane is combined either here or through the new outside value.
    fn combine(&mut self, rhs: &Self, op: impl Fn(u32, u32) -> u32) -> Result<(), Error> {
        let bounding_box = self.bounding_box.union(&rhs.bounding_box);
        if let Some(rhs_rect) = rhs.storage_rect() {
            self.grow_to_include(rhs_rect, self.outside)?;
        }
        trace!("combining {} with {}", self.rect, rhs.rect);

        let rect = self.rect;
        for (i, row) in self.words.chunks_exact_mut(self.words_per_row).enumerate() {
            let y = advance(rect.y1, i);
            for (j, word) in row.iter_mut().enumerate() {
                let x = word_start(rect.x1, j);
                *word = op(*word, rhs.get_pixels(x, y));
            }
        }

        self.outside = op(fill_word(self.outside), fill_word(rhs.outside)) != 0;
        self.bounding_box = bounding_box;
        self.count = self.compute_count();
        self.cache.invalidate();
        Ok(())
    }
}

/// Word-aligned `(x, y)` positions of a word-aligned rectangle
fn words_of(area: Rect) -> impl Iterator<Item = (i32, i32)> {
    iproduct!(area.y1..=area.y2, (area.x1..=area.x2).step_by(32)).map(|(y, x)| (x, y))
}
