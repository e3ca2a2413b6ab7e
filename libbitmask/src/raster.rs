//! Conversion between masks and 8-bit gray images
//!
//! Images map their pixel `(0, 0)` to a configurable origin in mask coordinates.

use bon::Builder;
use image::{GrayImage, Luma};
use tracing::debug;

use crate::{BitGridMask, Error, Rect, Region};

/// Luma written for selected pixels
pub const SELECTED: u8 = u8::MAX;
/// Luma written for pixels that are not selected
pub const UNSELECTED: u8 = 0;

/// How [`BitGridMask::from_luma8`] reads an image
#[derive(Builder, Debug, Clone, Copy, Eq, PartialEq)]
pub struct ImportOptions {
    /// Pixels with luma at or above this value are selected
    #[builder(default = 128)]
    pub threshold: u8,
    /// Mask coordinates of the image's top left pixel
    #[builder(default)]
    pub origin: (i32, i32),
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Region {
    /// Renders the region as a gray image, one image pixel per region pixel
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegionTooLarge`] if either side exceeds `u32::MAX` pixels
    pub fn to_luma8(&self) -> Result<GrayImage, Error> {
        let too_large = || Error::RegionTooLarge { rect: self.rect() };
        let width = u32::try_from(self.width()).map_err(|_| too_large())?;
        let height = u32::try_from(self.height()).map_err(|_| too_large())?;
        let mut image = GrayImage::new(width, height);
        for (pixel, selected) in image.pixels_mut().zip(self.pixels()) {
            *pixel = Luma([if *selected { SELECTED } else { UNSELECTED }]);
        }
        Ok(image)
    }
}

impl BitGridMask {
    /// Builds a mask selecting the image pixels whose luma reaches the threshold
    ///
    /// # Errors
    ///
    /// - [`Error::ImageTooLarge`] if the image does not fit the coordinate range at `origin`
    /// - [`Error::OutOfMemory`] if the storage cannot be allocated
    pub fn from_luma8(image: &GrayImage, options: ImportOptions) -> Result<Self, Error> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(Self::new());
        }
        let (x, y) = options.origin;
        let too_large = || Error::ImageTooLarge {
            width,
            height,
            origin: options.origin,
        };
        let last = |start: i32, len: u32| {
            i32::try_from(len - 1)
                .ok()
                .and_then(|len| start.checked_add(len))
                .ok_or_else(too_large)
        };
        let rect = Rect::new(x, y, last(x, width)?, last(y, height)?);
        debug!("importing {width}x{height} image into {rect}");

        let region = Region::from_fn(rect, |px, py| {
            // both offsets are bounded by the image dimensions
            let (ix, iy) = ((px - x).unsigned_abs(), (py - y).unsigned_abs());
            image.get_pixel(ix, iy).0[0] >= options.threshold
        });
        Self::from_region(&region)
    }
}
