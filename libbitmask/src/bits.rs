//! Word-level helpers for the packed storage
//!
//! Each storage word holds 32 columns. The most significant bit is the lowest
//! column of the word's span.

/// Number of pixel columns packed into a storage word
pub const WORD_BITS: i32 = 32;

/// A word with every column set
pub const ALL_SET: u32 = u32::MAX;

/// Number of set bits in a storage word
#[inline]
#[must_use]
pub const fn count_bits(v: u32) -> u32 {
    v.count_ones()
}

/// The word a uniform plane with the given value reads as
#[inline]
#[must_use]
pub const fn fill_word(value: bool) -> u32 {
    if value {
        ALL_SET
    } else {
        0
    }
}

/// Mask selecting the single column `offset` (0..32) of a word
#[inline]
#[must_use]
pub const fn column_bit(offset: i32) -> u32 {
    0x8000_0000 >> offset
}

/// Mask selecting columns `first..=last` of a word, MSB first
///
/// Both offsets are in `0..32` and `first <= last`.
#[inline]
#[must_use]
pub const fn span_mask(first: i32, last: i32) -> u32 {
    debug_assert!(0 <= first && first <= last && last < WORD_BITS);
    (ALL_SET >> first) & (ALL_SET << (WORD_BITS - 1 - last))
}

/// Rounds `x` down to the first column of its word (floor for negatives)
#[inline]
#[must_use]
pub const fn align_down(x: i32) -> i32 {
    x & !(WORD_BITS - 1)
}

/// Rounds `x` up to the last column of its word
#[inline]
#[must_use]
pub const fn align_up(x: i32) -> i32 {
    align_down(x) + (WORD_BITS - 1)
}

/// Column offset of `x` inside its word
#[inline]
#[must_use]
pub const fn word_offset(x: i32) -> i32 {
    x & (WORD_BITS - 1)
}

/// Distance from `origin` to `x`, where `origin <= x`
///
/// Computed in `i64` so that spans across the whole `i32` range do not overflow.
#[inline]
#[must_use]
pub const fn distance(origin: i32, x: i32) -> usize {
    (x as i64 - origin as i64) as usize
}

/// The coordinate `steps` units after `origin`, which must still fit in `i32`
#[inline]
#[must_use]
pub const fn advance(origin: i32, steps: usize) -> i32 {
    (origin as i64 + steps as i64) as i32
}

/// First column of word `i` in a row starting at the word-aligned column `origin`
#[inline]
#[must_use]
pub const fn word_start(origin: i32, i: usize) -> i32 {
    (origin as i64 + i as i64 * WORD_BITS as i64) as i32
}
