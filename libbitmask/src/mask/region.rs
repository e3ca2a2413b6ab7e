use strum::{Display, EnumString, IntoStaticStr};
use tracing::trace;

use super::BitGridMask;
use crate::{
    bits::{align_down, column_bit, distance, span_mask, WORD_BITS},
    rect::Rect,
    Error,
};

/// How [`BitGridMask::set_region`] changes the pixels of a rectangle
#[derive(
    Default, Debug, Eq, PartialEq, Copy, Clone, Hash, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum DrawMode {
    /// Select every pixel
    #[default]
    Draw,
    /// Deselect every pixel
    Erase,
    /// Flip every pixel
    Toggle,
}

/// A dense boolean grid covering a rectangle
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Region {
    rect: Rect,
    pixels: Vec<bool>,
}

impl Region {
    /// Creates a region from row-major pixels
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegionSize`] if `pixels` does not hold exactly one value per pixel of
    /// `rect`
    pub fn new(rect: impl Into<Rect>, pixels: Vec<bool>) -> Result<Self, Error> {
        let rect = rect.into();
        if u64::try_from(pixels.len()).ok() != Some(rect.area()) {
            return Err(Error::RegionSize {
                rect,
                len: pixels.len(),
            });
        }
        Ok(Self { rect, pixels })
    }

    /// Creates a region by evaluating `f` at every pixel of `rect`
    pub fn from_fn(rect: impl Into<Rect>, mut f: impl FnMut(i32, i32) -> bool) -> Self {
        let rect = rect.into();
        let pixels = (rect.y1..=rect.y2)
            .flat_map(|y| (rect.x1..=rect.x2).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self { rect, pixels }
    }

    /// The rectangle this region covers
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Number of columns
    #[must_use]
    pub const fn width(&self) -> u64 {
        self.rect.width()
    }

    /// Number of rows
    #[must_use]
    pub const fn height(&self) -> u64 {
        self.rect.height()
    }

    /// Row-major pixel values
    #[must_use]
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// The pixel at absolute coordinates `(x, y)`, or [`None`] outside the region
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        if !self.rect.contains(x, y) {
            return None;
        }
        let row = distance(self.rect.y1, y);
        let column = distance(self.rect.x1, x);
        Some(self.pixels[row * self.width() as usize + column])
    }

    /// Iterates the rows of the region, first row first
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks_exact(self.width() as usize)
    }

    /// Number of selected pixels
    #[must_use]
    pub fn selected(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }
}

/// The last region handed out by [`BitGridMask::get_region`]
///
/// Every mutation marks it stale.
#[derive(Debug, Default)]
pub(crate) struct RegionCache {
    region: Option<Region>,
    stale: bool,
}

impl RegionCache {
    pub(crate) fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Takes the cached region if it is current and covers `rect`
    fn take_fresh(&mut self, rect: &Rect) -> Option<Region> {
        let fresh = !self.stale
            && self
                .region
                .as_ref()
                .is_some_and(|region| region.rect == *rect);
        if fresh {
            self.region.take()
        } else {
            None
        }
    }

    fn store(&mut self, region: Region) -> &Region {
        self.stale = false;
        self.region.insert(region)
    }
}

impl BitGridMask {
    /// Builds a mask whose selected pixels are those of `region`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the storage cannot be allocated
    pub fn from_region(region: &Region) -> Result<Self, Error> {
        let mut mask = Self::new();
        let rect = region.rect;
        mask.grow_to_include(rect, false)?;
        for (y, row) in (rect.y1..=rect.y2).zip(region.rows()) {
            for word_x in (align_down(rect.x1)..=rect.x2).step_by(WORD_BITS as usize) {
                let values = (word_x..=word_x + (WORD_BITS - 1))
                    .filter(|x| rect.contains(*x, y) && row[distance(rect.x1, *x)])
                    .fold(0, |values, x| values | column_bit(x - word_x));
                mask.set_pixels(word_x, y, values)?;
            }
        }
        Ok(mask)
    }

    /// Changes every pixel of `rect` according to `mode`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if storage has to grow and cannot be allocated
    pub fn set_region(&mut self, rect: impl Into<Rect>, mode: DrawMode) -> Result<(), Error> {
        let rect = rect.into();

        // Partial words are only handled in place on a mask without selected pixels, other
        // masks combine with a separately drawn rectangle.
        if self.count > 0 {
            let mut shape = Self::filled(rect)?;
            return match mode {
                DrawMode::Draw => self.merge(&shape),
                DrawMode::Erase => {
                    shape.invert();
                    self.intersect(&shape)
                }
                DrawMode::Toggle => self.toggle(&shape),
            };
        }

        let untouched = !self.has_storage() || !self.rect.overlaps(&rect);
        if untouched && matches!((mode, self.outside), (DrawMode::Draw, true) | (DrawMode::Erase, false)) {
            return Ok(());
        }
        self.grow_to_include(rect, self.outside)?;
        trace!("{mode} region {rect}");

        let left = align_down(rect.x1);
        let right = align_down(rect.x2);
        for y in rect.y1..=rect.y2 {
            for word_x in (left..=right).step_by(WORD_BITS as usize) {
                let first = rect.x1.max(word_x) - word_x;
                let last = rect.x2.min(word_x + (WORD_BITS - 1)) - word_x;
                let span = span_mask(first, last);
                let current = self.get_pixels(word_x, y);
                let values = match mode {
                    DrawMode::Draw => current | span,
                    DrawMode::Erase => current & !span,
                    DrawMode::Toggle => current ^ span,
                };
                self.set_pixels(word_x, y, values)?;
            }
        }
        self.cache.invalidate();
        Ok(())
    }

    /// Materialises the pixels of `rect` as a dense grid
    ///
    /// The grid is cached until the mask changes or a different rectangle is requested.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the grid cannot be allocated
    pub fn get_region(&mut self, rect: impl Into<Rect>) -> Result<&Region, Error> {
        let rect = rect.into();
        let region = match self.cache.take_fresh(&rect) {
            Some(region) => region,
            None => self.materialize(rect)?,
        };
        Ok(self.cache.store(region))
    }

    fn materialize(&self, rect: Rect) -> Result<Region, Error> {
        let len = usize::try_from(rect.area()).map_err(|_| Error::OutOfMemory {
            words: usize::MAX,
        })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| Error::OutOfMemory { words: len / 32 })?;
        for y in rect.y1..=rect.y2 {
            let mut word_x = align_down(rect.x1);
            let mut values = self.get_pixels(word_x, y);
            for x in rect.x1..=rect.x2 {
                if align_down(x) != word_x {
                    word_x = align_down(x);
                    values = self.get_pixels(word_x, y);
                }
                pixels.push(values & column_bit(x - word_x) != 0);
            }
        }
        Ok(Region { rect, pixels })
    }
}
