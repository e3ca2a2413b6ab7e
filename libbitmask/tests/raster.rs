use image::{GrayImage, Luma};
use libbitmask::{BitGridMask, DrawMode, ImportOptions, Rect};

mod common;
use common::check_mask;

#[test]
fn region_renders_as_gray_image() -> anyhow::Result<()> {
    let mut mask = BitGridMask::new();
    mask.set_region((10, 20, 12, 21), DrawMode::Draw)?;
    mask.set_pixel(11, 20, false)?;

    let image = mask.get_region((10, 20, 13, 21))?.to_luma8()?;
    assert_eq!(image.dimensions(), (4, 2));
    assert_eq!(image.get_pixel(0, 0), &Luma([255]));
    assert_eq!(image.get_pixel(1, 0), &Luma([0]));
    assert_eq!(image.get_pixel(2, 1), &Luma([255]));
    assert_eq!(image.get_pixel(3, 1), &Luma([0]));
    Ok(())
}

#[test]
fn image_imports_with_threshold_and_origin() -> anyhow::Result<()> {
    let image = GrayImage::from_fn(40, 3, |x, _| Luma([if x % 4 == 0 { 200 } else { 90 }]));

    let options = ImportOptions::builder().origin((-20, 5)).build();
    assert_eq!(options.threshold, 128);
    let mask = BitGridMask::from_luma8(&image, options)?;
    check_mask(&mask, (-20, 5), (16, 7), 10 * 3);
    assert!(mask.get_pixel(-16, 6));
    assert!(!mask.get_pixel(-15, 6));

    let everything = BitGridMask::from_luma8(
        &image,
        ImportOptions::builder().threshold(90).build(),
    )?;
    check_mask(&everything, (0, 0), (39, 2), 40 * 3);
    Ok(())
}

#[test]
fn image_round_trip() -> anyhow::Result<()> {
    let mut mask = BitGridMask::new();
    mask.set_region((0, 0, 63, 9), DrawMode::Draw)?;
    mask.set_region((5, 2, 50, 6), DrawMode::Toggle)?;
    let rect = Rect::new(0, 0, 63, 9);
    let image = mask.get_region(rect)?.to_luma8()?;

    let imported = BitGridMask::from_luma8(&image, ImportOptions::default())?;
    assert_eq!(imported, mask);
    Ok(())
}

#[test]
fn oversized_images_are_rejected() -> anyhow::Result<()> {
    let image = GrayImage::new(8, 8);
    let options = ImportOptions::builder().origin((i32::MAX - 3, 0)).build();
    assert!(matches!(
        BitGridMask::from_luma8(&image, options),
        Err(libbitmask::Error::ImageTooLarge { width: 8, .. })
    ));
    assert!(BitGridMask::from_luma8(&GrayImage::new(0, 0), ImportOptions::default())?.is_empty());
    Ok(())
}
