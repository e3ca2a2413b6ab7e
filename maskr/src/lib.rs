use std::{fs::File, path::Path};

use anyhow::{bail, Result};
use clap::ValueEnum;
use image::{codecs::png::PngEncoder, ImageEncoder};
use libbitmask::{BitGridMask, DrawMode, ImportOptions, Rect};
use tracing::{debug, info, instrument};

/// Set operation applied by [`combine`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    /// Pixels selected in either mask
    Merge,
    /// Pixels selected in exactly one mask
    Toggle,
    /// Pixels selected in both masks
    Intersect,
}

/// Human readable summary of a mask file
#[instrument]
pub fn describe(mask_file: &Path) -> Result<String> {
    let mask = BitGridMask::from_file(mask_file)?;
    debug!("Read mask from file");
    let storage = mask
        .storage_rect()
        .map_or_else(|| "none".to_owned(), |rect| rect.to_string());
    Ok(format!(
        "outside: {}\ncount: {}\nstorage: {storage}\nbounding box: {}\nminimal bounding box: {}",
        mask.is_outside_selected(),
        mask.count(),
        mask.bounding_box(),
        mask.minimal_bounding_box(),
    ))
}

#[instrument]
pub fn apply_region(
    mask_file: Option<&Path>,
    rect: Rect,
    mode: DrawMode,
    output_name: &Path,
) -> Result<()> {
    let mut mask = match mask_file {
        Some(file) => BitGridMask::from_file(file)?,
        None => BitGridMask::new(),
    };
    mask.set_region(rect, mode)?;
    info!("{mode} {rect}, {} pixels selected", mask.count());
    mask.into_file(output_name)
}

#[instrument]
pub fn combine(lhs: &Path, rhs: &Path, operation: Operation, output_name: &Path) -> Result<()> {
    let mut mask = BitGridMask::from_file(lhs)?;
    let other = BitGridMask::from_file(rhs)?;
    match operation {
        Operation::Merge => mask.merge(&other)?,
        Operation::Toggle => mask.toggle(&other)?,
        Operation::Intersect => mask.intersect(&other)?,
    }
    info!("{operation:?} left {} pixels selected", mask.count());
    mask.into_file(output_name)
}

#[instrument]
pub fn invert(mask_file: &Path, output_name: &Path) -> Result<()> {
    let mut mask = BitGridMask::from_file(mask_file)?;
    mask.invert();
    mask.into_file(output_name)
}

/// Renders `clip`, or the mask's bounding box, as an 8-bit PNG
#[instrument]
pub fn mask_to_image(mask_file: &Path, clip: Option<Rect>, output_name: &Path) -> Result<()> {
    let mut mask = BitGridMask::from_file(mask_file)?;
    let rect = match clip {
        Some(rect) => rect,
        None if mask.storage_rect().is_some() => mask.bounding_box(),
        None => bail!("Mask has no stored pixels, pass a clip rectangle"),
    };
    let image = mask.get_region(rect)?.to_luma8()?;
    debug!("Rendering {rect} as {}x{}", image.width(), image.height());

    let output = File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open(output_name)?;

    info!("Writing mask image to {}", output_name.display());
    let encoder = PngEncoder::new(output);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::L8,
    )?;
    info!("Successfully wrote mask image to {}", output_name.display());
    Ok(())
}

#[instrument]
pub fn image_to_mask(image_file: &Path, options: ImportOptions, output_name: &Path) -> Result<()> {
    let img = image::open(image_file)?.to_luma8();
    debug!("Read {}x{} image", img.width(), img.height());
    let mask = BitGridMask::from_luma8(&img, options)?;
    info!(
        "Selected {} pixels at threshold {}",
        mask.count(),
        options.threshold
    );
    mask.into_file(output_name)
}
