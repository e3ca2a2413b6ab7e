use super::BitGridMask;
use crate::{
    bits::{align_down, WORD_BITS},
    rect::Rect,
};

/// Iterator over the selected pixels of a mask inside a clip rectangle
///
/// Pixels are visited row by row, left to right. Created by [`BitGridMask::selected_pixels`].
#[derive(Debug, Clone)]
pub struct SelectedPixels<'a> {
    mask: &'a BitGridMask,
    clip: Rect,
    next: Option<(i32, i32)>,
}

impl<'a> SelectedPixels<'a> {
    fn new(mask: &'a BitGridMask, clip: Rect) -> Self {
        Self {
            mask,
            clip,
            next: Some((clip.x1, clip.y1)),
        }
    }

    /// Position following `(x, y)` in row-major order
    const fn step(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        if x < self.clip.x2 {
            Some((x + 1, y))
        } else if y < self.clip.y2 {
            Some((self.clip.x1, y + 1))
        } else {
            None
        }
    }
}

impl Iterator for SelectedPixels<'_> {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((x, y)) = self.next {
            // skip whole words that cannot hold a selected pixel
            if !self.mask.outside && self.mask.get_pixels(x, y) == 0 {
                let word_end = align_down(x).saturating_add(WORD_BITS - 1);
                self.next = self.step(word_end.min(self.clip.x2), y);
                continue;
            }
            self.next = self.step(x, y);
            if self.mask.get_pixel(x, y) {
                return Some((x, y));
            }
        }
        None
    }
}

impl BitGridMask {
    /// Iterates the selected pixels inside `clip`
    pub fn selected_pixels(&self, clip: impl Into<Rect>) -> SelectedPixels<'_> {
        SelectedPixels::new(self, clip.into())
    }

    /// The smallest rectangle holding every selected pixel inside `clip`
    #[must_use]
    pub fn selected_extent(&self, clip: impl Into<Rect>) -> Option<Rect> {
        self.selected_pixels(clip)
            .map(|(x, y)| Rect::point(x, y))
            .reduce(|extent, pixel| extent.union(&pixel))
    }
}
