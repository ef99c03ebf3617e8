//! Piecewise-affine image warping.
//!
//! The destination control points are triangulated, and every triangle carries its own affine
//! map back into the source image. Each output pixel is resampled from the source through the
//! map of the triangle containing it.
//!
//! # Examples
//!
//! Warping an image onto its own control points reproduces it:
//!
//! ```
//! use morphimate_image::{Image, ImageSize};
//! use morphimate_imgproc::interpolation::{ImageSampler, InterpolationMode};
//! use morphimate_imgproc::warp::warp_to_points;
//!
//! let size = ImageSize { width: 5, height: 4 };
//! let image = Image::<u8, 3>::from_fn(size, |x, y| [(x * 50) as u8, (y * 60) as u8, 7]);
//! let points = [[0, 0], [4, 0], [0, 3], [4, 3], [2, 1]];
//!
//! let sampler = ImageSampler::new(&image, InterpolationMode::Bicubic).unwrap();
//! let warped = warp_to_points(&sampler, &points, &points, size).unwrap();
//! assert_eq!(warped, image);
//! ```

mod affine;
mod piecewise;

pub use affine::{affine_from_triangles, transform_point};
pub use piecewise::{warp_piecewise_affine, warp_to_points};
