use tracing::{debug, trace};

use super::BitGridMask;
use crate::{
    bits::{advance, count_bits, distance, fill_word, span_mask, word_start, WORD_BITS},
    rect::Rect,
    Error,
};

impl BitGridMask {
    pub(crate) fn has_storage(&self) -> bool {
        !self.words.is_empty()
    }

    /// Index into `words` of the word holding `(x, y)`, which must be inside storage
    #[inline]
    pub(crate) fn word_index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.rect.contains(x, y));
        let row = distance(self.rect.y1, y);
        let column = distance(self.rect.x1, x) / WORD_BITS as usize;
        row * self.words_per_row + column
    }

    #[inline]
    pub(crate) fn in_storage(&self, x: i32, y: i32) -> bool {
        self.has_storage() && self.rect.contains(x, y)
    }

    /// Mask of the columns of the word starting at `word_x` that lie inside the bounding box
    pub(crate) fn box_columns(&self, word_x: i32) -> u32 {
        let first = self.bounding_box.x1.max(word_x);
        let last = self.bounding_box.x2.min(word_x.saturating_add(WORD_BITS - 1));
        if first > last {
            0
        } else {
            span_mask(first - word_x, last - word_x)
        }
    }

    /// Expands storage to cover `requested`, filling new cells with `fill`
    ///
    /// Pixels inside the current bounding box keep their value, every other pixel of the plane
    /// takes `fill`, which also becomes the outside value. If storage is reallocated the bounding
    /// box grows to include `requested`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the new storage cannot be allocated. The mask should not
    /// be used afterwards.
    pub fn grow_to_include(&mut self, requested: impl Into<Rect>, fill: bool) -> Result<(), Error> {
        let requested = requested.into();
        let aligned = requested.word_aligned();

        if self.has_storage() && fill != self.outside {
            self.reset_outside_bounding_box(fill);
        }

        if self.has_storage() && self.rect.contains_rect(&aligned) {
            self.outside = fill;
            self.cache.invalidate();
            return Ok(());
        }

        let (rect, bounding_box) = if self.has_storage() {
            (
                self.rect.union(&aligned),
                self.bounding_box.union(&requested),
            )
        } else {
            (aligned, requested)
        };

        let words_per_row = rect.words_per_row();
        let rows = usize::try_from(rect.height()).map_err(|_| Error::OutOfMemory {
            words: usize::MAX,
        })?;
        let total = words_per_row
            .checked_mul(rows)
            .ok_or(Error::OutOfMemory { words: usize::MAX })?;
        debug!(
            "growing mask storage from {} to {rect} ({total} words)",
            self.rect
        );

        let mut words = Vec::new();
        words
            .try_reserve_exact(total)
            .map_err(|_| Error::OutOfMemory { words: total })?;
        words.resize(total, fill_word(fill));

        if self.has_storage() {
            let left = distance(rect.x1, self.rect.x1) / WORD_BITS as usize;
            let top = distance(rect.y1, self.rect.y1);
            for (i, row) in self.words.chunks_exact(self.words_per_row).enumerate() {
                let start = (top + i) * words_per_row + left;
                words[start..start + self.words_per_row].copy_from_slice(row);
            }
        }

        let covered = if self.has_storage() {
            self.bounding_box.area()
        } else {
            0
        };
        if fill {
            self.count += bounding_box.area() - covered;
        }

        self.words = words;
        self.rect = rect;
        self.bounding_box = bounding_box;
        self.words_per_row = words_per_row;
        self.rows = rows;
        self.outside = fill;
        self.cache.invalidate();
        Ok(())
    }

    /// Rewrites every stored bit outside the bounding box to `fill`
    pub(crate) fn reset_outside_bounding_box(&mut self, fill: bool) {
        trace!("resetting cells outside {} to {fill}", self.bounding_box);
        let fill = fill_word(fill);
        let (rect, bounding_box, words_per_row) = (self.rect, self.bounding_box, self.words_per_row);
        let columns: Vec<u32> = (0..words_per_row)
            .map(|i| self.box_columns(word_start(rect.x1, i)))
            .collect();
        for (i, row) in self.words.chunks_exact_mut(words_per_row).enumerate() {
            let y = advance(rect.y1, i);
            if y < bounding_box.y1 || y > bounding_box.y2 {
                row.fill(fill);
                continue;
            }
            for (word, inside) in row.iter_mut().zip(&columns) {
                *word = (*word & inside) | (fill & !inside);
            }
        }
    }

    /// Widens the bounding box to include `area`, which must be inside storage
    pub(crate) fn widen_bounding_box(&mut self, area: Rect) {
        let widened = self.bounding_box.union(&area);
        if widened != self.bounding_box {
            if self.outside {
                // newly covered cells all hold the outside value
                self.count += widened.area() - self.bounding_box.area();
            }
            self.bounding_box = widened;
        }
    }

    /// Counts the set pixels inside the bounding box by scanning storage
    pub(crate) fn compute_count(&self) -> u64 {
        if !self.has_storage() {
            return 0;
        }
        let columns: Vec<u32> = (0..self.words_per_row)
            .map(|i| self.box_columns(word_start(self.rect.x1, i)))
            .collect();
        self.words
            .chunks_exact(self.words_per_row)
            .enumerate()
            .filter(|(i, _)| {
                let y = advance(self.rect.y1, *i);
                y >= self.bounding_box.y1 && y <= self.bounding_box.y2
            })
            .map(|(_, row)| {
                row.iter()
                    .zip(&columns)
                    .map(|(word, inside)| u64::from(count_bits(word & inside)))
                    .sum::<u64>()
            })
            .sum()
    }
}
