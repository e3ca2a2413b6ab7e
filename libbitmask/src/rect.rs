use std::fmt::Display;

use crate::bits::{align_down, align_up};

/// An inclusive pixel rectangle
///
/// `(x1, y1)` is the corner with the smallest coordinates and `(x2, y2)` the corner with the
/// largest. [`Rect::new`] normalises corners given in any order.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Rect {
    /// Left column
    pub x1: i32,
    /// First row
    pub y1: i32,
    /// Right column (inclusive)
    pub x2: i32,
    /// Last row (inclusive)
    pub y2: i32,
}

impl Rect {
    /// Creates a rectangle from two corners, in any order
    #[must_use]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// A single pixel
    #[must_use]
    pub const fn point(x: i32, y: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x,
            y2: y,
        }
    }

    /// Number of columns
    #[must_use]
    pub const fn width(&self) -> u64 {
        (self.x2 as i64 - self.x1 as i64 + 1) as u64
    }

    /// Number of rows
    #[must_use]
    pub const fn height(&self) -> u64 {
        (self.y2 as i64 - self.y1 as i64 + 1) as u64
    }

    /// Number of pixels covered
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width() * self.height()
    }

    /// Whether `(x, y)` lies inside the rectangle
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Whether `other` lies entirely inside the rectangle
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }

    /// Whether the two rectangles share any pixel
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        !(self.x1 > other.x2 || self.x2 < other.x1 || self.y1 > other.y2 || self.y2 < other.y1)
    }

    /// Smallest rectangle covering both
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Shared pixels of both rectangles, if any
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        self.overlaps(other).then(|| Self {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        })
    }

    /// Widens the columns to whole storage words
    #[must_use]
    pub const fn word_aligned(&self) -> Self {
        Self {
            x1: align_down(self.x1),
            y1: self.y1,
            x2: align_up(self.x2),
            y2: self.y2,
        }
    }

    /// Number of storage words per row of a word-aligned rectangle
    #[must_use]
    pub const fn words_per_row(&self) -> usize {
        (self.width() / 32) as usize
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.x1, self.y1, self.x2, self.y2)
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((x1, y1, x2, y2): (i32, i32, i32, i32)) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}
