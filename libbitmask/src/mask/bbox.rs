use super::BitGridMask;
use crate::{
    bits::{word_start, WORD_BITS},
    rect::Rect,
    Error,
};

impl BitGridMask {
    /// Discards every deviation from the outside value that lies outside `clip`
    ///
    /// Afterwards the mask equals its previous self inside `clip` and the outside value
    /// everywhere else, and the bounding box no longer reaches beyond `clip`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if storage has to grow and cannot be allocated
    pub fn clip_bounding_box(&mut self, clip: impl Into<Rect>) -> Result<(), Error> {
        let clip = clip.into();
        let previous = std::mem::take(self);
        self.outside = previous.outside;
        if !previous.has_storage() {
            return Ok(());
        }
        // Outside the old bounding box every pixel already reads as the outside value
        let Some(area) = clip.intersection(&previous.bounding_box) else {
            return Ok(());
        };
        for y in area.y1..=area.y2 {
            for x in area.x1..=area.x2 {
                let value = previous.get_pixel(x, y);
                if value != previous.outside {
                    self.set_pixel(x, y, value)?;
                }
            }
        }
        Ok(())
    }

    /// The smallest rectangle containing every set pixel of the bounding box
    ///
    /// Returns `(0, 0, 0, 0)` if no pixel is set.
    #[must_use]
    pub fn minimal_bounding_box(&self) -> Rect {
        if !self.has_storage() || self.count == 0 {
            return Rect::default();
        }
        let bounding_box = self.bounding_box;
        let row_has_bits = |y: i32| {
            (0..self.words_per_row).any(|i| self.masked_word(i, y) != 0)
        };
        let Some(y1) = (bounding_box.y1..=bounding_box.y2).find(|y| row_has_bits(*y)) else {
            return Rect::default();
        };
        let y2 = (y1..=bounding_box.y2)
            .rev()
            .find(|y| row_has_bits(*y))
            .unwrap_or(y1);

        // OR each column of words over the occupied rows
        let column = |i: usize| (y1..=y2).fold(0, |bits, y| bits | self.masked_word(i, y));
        let word_x = |i: usize| word_start(self.rect.x1, i);
        let x1 = (0..self.words_per_row)
            .find_map(|i| {
                let bits = column(i);
                (bits != 0).then(|| word_x(i) + bits.leading_zeros() as i32)
            })
            .unwrap_or(bounding_box.x1);
        let x2 = (0..self.words_per_row)
            .rev()
            .find_map(|i| {
                let bits = column(i);
                (bits != 0).then(|| word_x(i) + (WORD_BITS - 1 - bits.trailing_zeros() as i32))
            })
            .unwrap_or(bounding_box.x2);

        Rect { x1, y1, x2, y2 }
    }

    /// Word `i` of row `y` restricted to the bounding box columns
    fn masked_word(&self, i: usize, y: i32) -> u32 {
        let word_x = word_start(self.rect.x1, i);
        self.words[self.word_index(word_x, y)] & self.box_columns(word_x)
    }
}
