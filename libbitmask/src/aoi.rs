//! Areas of interest built from drawn shapes
//!
//! An [`Aoi`] keeps every shape drawn into it, in order, and folds them into a single selection
//! mask on demand.

use bon::Builder;
use tracing::{debug, instrument};

use crate::{BitGridMask, DrawMode, Error, Rect};

/// A mask drawn into an [`Aoi`] and the way it was drawn
#[derive(Builder, Debug, Clone, Eq, PartialEq)]
pub struct AoiShape {
    /// Pixels covered by the shape
    mask: BitGridMask,
    /// How the shape changes the selection
    #[builder(default)]
    mode: DrawMode,
}

impl AoiShape {
    /// Pixels covered by the shape
    #[must_use]
    pub const fn mask(&self) -> &BitGridMask {
        &self.mask
    }

    /// How the shape changes the selection
    #[must_use]
    pub const fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Applies the shape to `selection`
    fn apply(&self, selection: &mut BitGridMask) -> Result<(), Error> {
        match self.mode {
            DrawMode::Draw => selection.merge(&self.mask),
            DrawMode::Erase => {
                let mut inverse = self.mask.clone();
                inverse.invert();
                selection.intersect(&inverse)
            }
            DrawMode::Toggle => selection.toggle(&self.mask),
        }
    }
}

/// An ordered collection of shapes selecting pixels of a raster
#[derive(Debug, Default, Clone)]
pub struct Aoi {
    shapes: Vec<AoiShape>,
    all_points_toggled: bool,
}

impl Aoi {
    /// Creates an area of interest without shapes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shape
    pub fn add_shape(&mut self, shape: AoiShape) {
        self.shapes.push(shape);
    }

    /// Appends a rectangle drawn with `mode`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the shape's storage cannot be allocated
    pub fn add_rect(&mut self, rect: impl Into<Rect>, mode: DrawMode) -> Result<(), Error> {
        let shape = AoiShape::builder()
            .mask(BitGridMask::filled(rect)?)
            .mode(mode)
            .build();
        self.add_shape(shape);
        Ok(())
    }

    /// Appends a single pixel drawn with `mode`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the shape's storage cannot be allocated
    pub fn add_pixel(&mut self, x: i32, y: i32, mode: DrawMode) -> Result<(), Error> {
        self.add_rect(Rect::point(x, y), mode)
    }

    /// Removes every shape and resets the toggle
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.all_points_toggled = false;
    }

    /// Inverts the whole selection
    pub fn toggle_all_points(&mut self) {
        self.all_points_toggled = !self.all_points_toggled;
    }

    /// Whether the selection is currently inverted
    #[must_use]
    pub const fn is_all_points_toggled(&self) -> bool {
        self.all_points_toggled
    }

    /// Number of shapes drawn
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// The shapes, in drawing order
    #[must_use]
    pub fn shapes(&self) -> &[AoiShape] {
        &self.shapes
    }

    /// Folds every shape, in order, into a single selection mask
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the selection cannot grow
    #[instrument(skip(self), fields(shapes = self.shapes.len()))]
    pub fn selected_pixels(&self) -> Result<BitGridMask, Error> {
        let mut selection = BitGridMask::new();
        for shape in &self.shapes {
            shape.apply(&mut selection)?;
        }
        if self.all_points_toggled {
            selection.invert();
        }
        debug!(
            "selection holds {} pixels in {}",
            selection.count(),
            selection.bounding_box()
        );
        Ok(selection)
    }
}
