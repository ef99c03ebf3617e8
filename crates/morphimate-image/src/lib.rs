#![deny(missing_docs)]
//! Image types and traits for generating and manipulating images

/// image representation for the warping engine.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};

/// An interleaved 8-bit RGB image, the only colour layout the engine warps.
pub type Rgb8 = Image<u8, 3>;
