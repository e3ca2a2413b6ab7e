/// Demonstrates how to render the selection of an [`Aoi`] as a png file
/// using the [`image`] crate
///
use image::{codecs::png::PngEncoder, ImageEncoder};
use libbitmask::{Aoi, DrawMode};
use std::fs::File;

fn main() -> anyhow::Result<()> {
    let mut aoi = Aoi::new();
    aoi.add_rect((0, 0, 199, 99), DrawMode::Draw)?;
    aoi.add_rect((50, 25, 149, 74), DrawMode::Erase)?;
    aoi.add_rect((90, 0, 109, 99), DrawMode::Toggle)?;

    let mut selection = aoi.selected_pixels()?;
    let rect = selection.minimal_bounding_box();
    let image = selection.get_region(rect)?.to_luma8()?;

    let output = File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open("aoi_to_png_example.png")?;

    let encoder = PngEncoder::new(output);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::L8,
    )?;
    Ok(())
}
