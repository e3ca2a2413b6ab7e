use libbitmask::{Aoi, AoiShape, BitGridMask, DrawMode};

mod common;
use common::check_mask;

#[test]
fn shapes_fold_in_order() -> anyhow::Result<()> {
    let mut aoi = Aoi::new();
    assert_eq!(aoi.selected_pixels()?, BitGridMask::new());

    aoi.add_rect((0, 0, 9, 9), DrawMode::Draw)?;
    aoi.add_rect((5, 5, 14, 14), DrawMode::Erase)?;
    aoi.add_rect((8, 0, 11, 1), DrawMode::Toggle)?;
    aoi.add_pixel(20, 20, DrawMode::Draw)?;
    assert_eq!(aoi.shape_count(), 4);
    assert_eq!(aoi.shapes()[1].mode(), DrawMode::Erase);

    let selection = aoi.selected_pixels()?;
    // 100 drawn, 25 erased, 4 toggled off and 4 toggled on, one extra pixel
    check_mask(&selection, (0, 0), (20, 20), 100 - 25 + 1);
    assert!(!selection.get_pixel(8, 0));
    assert!(selection.get_pixel(10, 1));
    assert!(!selection.get_pixel(7, 7));
    assert!(selection.get_pixel(20, 20));
    Ok(())
}

#[test]
fn erasing_before_drawing_has_no_effect() -> anyhow::Result<()> {
    let mut aoi = Aoi::new();
    aoi.add_rect((0, 0, 9, 9), DrawMode::Erase)?;
    aoi.add_rect((0, 0, 1, 1), DrawMode::Draw)?;
    let selection = aoi.selected_pixels()?;
    assert_eq!(selection.count(), 4);
    assert!(!selection.is_outside_selected());
    Ok(())
}

#[test]
fn toggling_all_points() -> anyhow::Result<()> {
    let mut aoi = Aoi::new();
    aoi.add_rect((0, 0, 3, 3), DrawMode::Draw)?;
    aoi.toggle_all_points();
    assert!(aoi.is_all_points_toggled());

    let selection = aoi.selected_pixels()?;
    assert!(selection.is_outside_selected());
    assert!(!selection.get_pixel(1, 1));
    assert!(selection.get_pixel(4, 4));
    assert!(selection.get_pixel(-1_000, 1_000));

    aoi.toggle_all_points();
    assert!(!aoi.is_all_points_toggled());
    assert_eq!(aoi.selected_pixels()?, BitGridMask::filled((0, 0, 3, 3))?);

    aoi.toggle_all_points();
    aoi.clear();
    assert_eq!(aoi.shape_count(), 0);
    assert!(!aoi.is_all_points_toggled());
    assert!(aoi.selected_pixels()?.is_empty());
    Ok(())
}

#[test]
fn shapes_from_builder() -> anyhow::Result<()> {
    let mut ring = BitGridMask::filled((0, 0, 4, 4))?;
    ring.set_pixel(2, 2, false)?;

    let mut aoi = Aoi::new();
    aoi.add_shape(AoiShape::builder().mask(ring.clone()).build());
    assert_eq!(aoi.shapes()[0].mode(), DrawMode::Draw);
    assert_eq!(aoi.shapes()[0].mask(), &ring);
    aoi.add_shape(
        AoiShape::builder()
            .mask(BitGridMask::filled((2, 2, 2, 2))?)
            .mode(DrawMode::Toggle)
            .build(),
    );
    assert_eq!(aoi.selected_pixels()?, BitGridMask::filled((0, 0, 4, 4))?);
    Ok(())
}
