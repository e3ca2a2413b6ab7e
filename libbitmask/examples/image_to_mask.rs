/// Demonstrates how to build a [`BitGridMask`] from a gray image and save it as a document
///
use image::{GrayImage, Luma};
use libbitmask::{BitGridMask, ImportOptions};

fn main() -> anyhow::Result<()> {
    // a disc of radius 40
    let img = GrayImage::from_fn(100, 100, |x, y| {
        let (dx, dy) = (f64::from(x) - 50.0, f64::from(y) - 50.0);
        Luma([if dx.hypot(dy) <= 40.0 { 255 } else { 0 }])
    });

    let options = ImportOptions::builder().origin((-50, -50)).build();
    let mask = BitGridMask::from_luma8(&img, options)?;
    println!(
        "selected {} pixels in {}",
        mask.count(),
        mask.minimal_bounding_box()
    );

    mask.into_file("image_to_mask_example.xml")?;
    let restored = BitGridMask::from_file("image_to_mask_example.xml")?;
    assert!(restored.get_pixel(0, 0));
    assert!(!restored.get_pixel(-50, -50));
    Ok(())
}
