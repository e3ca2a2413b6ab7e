//! # libbitmask
//!
//!
//! This library provides a packed-bit region mask for raster selections: the set of pixels a
//! user picked on an image, built from rectangles, single pixels and other masks.
//!
//! A [`BitGridMask`] logically covers the whole pixel plane. Only a word-aligned rectangle is
//! stored, 32 pixels per `u32` word, and every pixel outside of it reads as the mask's outside
//! value. Storage grows on demand, so a mask can be drawn into anywhere without declaring its
//! extent up front.
//!
//! ### Operations
//!
//! - Pixel access, one pixel at a time or 32 at a time ([`BitGridMask::get_pixels`])
//! - Rectangle fills in three [`DrawMode`]s
//! - Boolean set algebra: [`BitGridMask::merge`] (union), [`BitGridMask::toggle`] (symmetric
//!   difference), [`BitGridMask::intersect`] and [`BitGridMask::invert`]
//! - Equality and subset tests
//! - A loose, grow-only bounding box and an exact minimal bounding box
//! - Serialization into a small element tree, with a CCITT checksum over the payload
//!
//! ### Usage
//!
//! #### Drawing and combining masks
//!
//! ```rust
//! use libbitmask::{BitGridMask, DrawMode};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut mask = BitGridMask::new();
//!     mask.set_region((0, 0, 9, 9), DrawMode::Draw)?;
//!     mask.set_region((4, 4, 5, 5), DrawMode::Erase)?;
//!     assert_eq!(mask.count(), 96);
//!
//!     let mut other = BitGridMask::filled((100, 100, 100, 100))?;
//!     other.merge(&mask)?;
//!     assert!(other.get_pixel(100, 100));
//!     assert!(other.get_pixel(0, 0));
//!     assert!(!other.get_pixel(4, 4));
//!     Ok(())
//! }
//! ```
//!
//! #### Saving a mask
//!
//! Masks write themselves into an [`Element`] owned by the caller, or into a standalone document.
//!
//! ```rust
//! use libbitmask::{BitGridMask, Element};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut mask = BitGridMask::new();
//!     mask.set_pixel(-40, 7, true)?;
//!
//!     let mut element = Element::new("aoi");
//!     mask.to_xml(&mut element);
//!     let restored = BitGridMask::from_xml(&element)?;
//!     assert_eq!(restored, mask);
//!
//!     mask.into_file("bitmask_example.xml")?;
//!     let restored = BitGridMask::from_file("bitmask_example.xml")?;
//!     assert!(restored.get_pixel(-40, 7));
//! #   std::fs::remove_file("bitmask_example.xml")?;
//!     Ok(())
//! }
//! ```
//!
//! #### Areas of interest
//!
//! An [`Aoi`] records shapes in drawing order and folds them into one selection.
//!
//! ```rust
//! use libbitmask::{Aoi, DrawMode};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut aoi = Aoi::new();
//!     aoi.add_rect((0, 0, 3, 3), DrawMode::Draw)?;
//!     aoi.add_pixel(1, 1, DrawMode::Erase)?;
//!     assert_eq!(aoi.selected_pixels()?.count(), 15);
//!     Ok(())
//! }
//! ```
//!
//! #### Unstable API
//!
//! This crate is still very much a work-in-progress. Expect breaking changes between minor
//! releases until`v1.0`.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

mod aoi;
pub mod bits;
mod error;
mod mask;
pub mod raster;
mod rect;
mod serde;

pub use aoi::{Aoi, AoiShape};
pub use error::Error;
pub use mask::{BitGridMask, DrawMode, Region, SelectedPixels};
pub use raster::ImportOptions;
pub use rect::Rect;
pub use serde::document::{Element, Node};
pub use serde::error::Error as DocumentError;
pub use serde::DOCUMENT_ROOT;
