#![allow(dead_code)]

use libbitmask::{BitGridMask, DrawMode, Rect};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Origin of most drawn shapes, away from zero and word boundaries
pub const OX: i32 = 1000;
pub const OY: i32 = 1000;

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_b175)
}

/// Number of selected pixels in the bounding box, counted one by one
pub fn brute_count(mask: &BitGridMask) -> u64 {
    if mask.storage_rect().is_none() {
        return 0;
    }
    let bb = mask.bounding_box();
    let mut selected = 0;
    for y in bb.y1..=bb.y2 {
        for x in bb.x1..=bb.x2 {
            if mask.get_pixel(x, y) {
                selected += 1;
            }
        }
    }
    selected
}

/// Checks storage alignment and that stored bits outside the bounding box hold the outside value
pub fn check_storage(mask: &BitGridMask) {
    let Some(storage) = mask.storage_rect() else {
        return;
    };
    let bb = mask.bounding_box();
    assert_eq!(storage.x1.rem_euclid(32), 0, "storage {storage} is not aligned");
    assert_eq!(storage.width() % 32, 0, "storage {storage} is not whole words");
    assert_eq!(storage.words_per_row(), mask.words_per_row());
    assert_eq!(storage.height(), mask.row_count() as u64);
    assert!(storage.contains_rect(&bb), "{bb} escapes storage {storage}");

    let outside = mask.is_outside_selected();
    for y in storage.y1..=storage.y2 {
        for word_x in (storage.x1..=storage.x2).step_by(32) {
            let word = mask.get_pixels(word_x, y);
            for column in 0..32 {
                if !bb.contains(word_x + column, y) {
                    let bit = word & (0x8000_0000 >> column) != 0;
                    assert_eq!(bit, outside, "stale bit at ({}, {y})", word_x + column);
                }
            }
        }
    }
}

/// Checks a mask's minimal box and count, then cross-checks the count pixel by pixel
pub fn check_mask(mask: &BitGridMask, ul: (i32, i32), lr: (i32, i32), count: u64) {
    let minimal = mask.minimal_bounding_box();
    assert_eq!(minimal, Rect::new(ul.0, ul.1, lr.0, lr.1), "minimal bounding box");
    assert_eq!(mask.count(), count, "count");
    if count > 0 {
        assert!(mask.bounding_box().contains_rect(&minimal));
        assert_eq!(brute_count(mask), count, "pixels on in the bounding box");
    }
    check_storage(mask);
}

/// A 10 pixel wide bar of `length` centred on `(x, y)`, checked after drawing
pub fn bar(length: i32, horizontal: bool, x: i32, y: i32) -> BitGridMask {
    let (x_len, y_len) = if horizontal { (length, 10) } else { (10, length) };
    let (x1, y1, x2, y2) = (x - x_len / 2, y - y_len / 2, x + x_len / 2, y + y_len / 2);
    let mut mask = BitGridMask::new();
    mask.set_region((x1, y1, x2, y2), DrawMode::Draw).unwrap();
    let count = u64::from((x2 - x1 + 1).unsigned_abs() * (y2 - y1 + 1).unsigned_abs());
    check_mask(&mask, (x1, y1), (x2, y2), count);
    mask
}

/// A mask with random pixels inside `area`, built with every kind of mutation
pub fn random_mask(rng: &mut StdRng, area: Rect) -> BitGridMask {
    let mut mask = BitGridMask::new();
    for _ in 0..40 {
        let x = rng.gen_range(area.x1..=area.x2);
        let y = rng.gen_range(area.y1..=area.y2);
        mask.set_pixel(x, y, rng.gen_bool(0.7)).unwrap();
    }
    for _ in 0..3 {
        let x1 = rng.gen_range(area.x1..=area.x2);
        let y1 = rng.gen_range(area.y1..=area.y2);
        let x2 = rng.gen_range(x1..=area.x2);
        let y2 = rng.gen_range(y1..=area.y2);
        let mode = match rng.gen_range(0..3) {
            0 => DrawMode::Draw,
            1 => DrawMode::Erase,
            _ => DrawMode::Toggle,
        };
        mask.set_region((x1, y1, x2, y2), mode).unwrap();
    }
    mask
}
