use super::BitGridMask;
use crate::{
    bits::{align_down, column_bit, count_bits, fill_word, word_offset, WORD_BITS},
    rect::Rect,
    Error,
};

impl BitGridMask {
    /// Returns whether the pixel at `(x, y)` is selected
    ///
    /// Pixels outside the bounding box read as the outside value.
    #[must_use]
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        if !self.has_storage() || !self.bounding_box.contains(x, y) {
            return self.outside;
        }
        self.words[self.word_index(x, y)] & column_bit(word_offset(x)) != 0
    }

    /// Selects or deselects the pixel at `(x, y)`, growing storage if needed
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if storage has to grow and cannot be allocated
    pub fn set_pixel(&mut self, x: i32, y: i32, value: bool) -> Result<(), Error> {
        if !self.in_storage(x, y) {
            if value == self.outside {
                return Ok(());
            }
            self.grow_to_include(Rect::point(x, y), self.outside)?;
        }

        if value != self.outside {
            self.widen_bounding_box(Rect::point(x, y));
        }

        let index = self.word_index(x, y);
        let bit = column_bit(word_offset(x));
        let word = &mut self.words[index];
        if (*word & bit != 0) != value {
            *word ^= bit;
            if value {
                self.count += 1;
            } else {
                self.count -= 1;
            }
            self.cache.invalidate();
        }
        Ok(())
    }

    /// Returns the 32 pixels of row `y` in the word containing column `x`
    ///
    /// `x` is rounded down to a multiple of 32. The first column is the most significant bit.
    #[must_use]
    pub fn get_pixels(&self, x: i32, y: i32) -> u32 {
        let x = align_down(x);
        if !self.in_storage(x, y) {
            return fill_word(self.outside);
        }
        self.words[self.word_index(x, y)]
    }

    /// Writes the 32 pixels of row `y` in the word containing column `x`
    ///
    /// `x` is rounded down to a multiple of 32. The bounding box widens to cover every column
    /// whose new value differs from the outside value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if storage has to grow and cannot be allocated
    pub fn set_pixels(&mut self, x: i32, y: i32, values: u32) -> Result<(), Error> {
        let x = align_down(x);
        let differs = values ^ fill_word(self.outside);
        let changed = (differs != 0).then(|| {
            Rect::new(
                x + differs.leading_zeros() as i32,
                y,
                x + (WORD_BITS - 1 - differs.trailing_zeros() as i32),
                y,
            )
        });

        if !self.in_storage(x, y) {
            let Some(changed) = changed else {
                return Ok(());
            };
            self.grow_to_include(changed, self.outside)?;
        }
        if let Some(changed) = changed {
            self.widen_bounding_box(changed);
        }

        let inside = if y >= self.bounding_box.y1 && y <= self.bounding_box.y2 {
            self.box_columns(x)
        } else {
            0
        };
        let index = self.word_index(x, y);
        let previous = self.words[index];
        self.count = self.count + u64::from(count_bits(values & inside))
            - u64::from(count_bits(previous & inside));
        self.words[index] = values;
        self.cache.invalidate();
        Ok(())
    }
}
