#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image blending module.
pub mod enhance;

/// Error types for the geometric operations.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// Delaunay triangulation and point location.
pub mod triangulation;

/// image geometric transformations module.
pub mod warp;

pub use crate::error::GeometryError;
