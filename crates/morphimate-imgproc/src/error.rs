use morphimate_image::ImageError;
use thiserror::Error;

/// An error type for the geometric operations.
#[derive(Error, Debug, PartialEq)]
pub enum GeometryError {
    /// No triangle can be formed from the points: too few of them, or all collinear.
    #[error("Cannot triangulate {points} points: too few or all collinear")]
    DegenerateGeometry {
        /// Number of points supplied.
        points: usize,
    },

    /// The affine map of a triangle is not invertible because the triangle has zero area.
    #[error("Triangle {triangle} has zero area, its affine transform is singular")]
    SingularTransform {
        /// Index of the offending triangle in the triangulation.
        triangle: usize,
    },

    /// Two point sets that must correspond have different lengths.
    #[error("Point set length mismatch: expected {0}, got {1}")]
    PointSetLengthMismatch(usize, usize),

    /// Error from the image containers.
    #[error(transparent)]
    Image(#[from] ImageError),
}
