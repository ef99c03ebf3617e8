use morphimate_image::ImageError;
use morphimate_imgproc::GeometryError;
use thiserror::Error;

/// An error type for morph sessions and the frame pipeline.
#[derive(Error, Debug, PartialEq)]
pub enum MorphError {
    /// Triangulation or warping failed on the control points.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Error from the image containers.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The image supplier could not provide the next image.
    #[error("Image supplier failed: {0}")]
    Supplier(String),

    /// The configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The producer thread could not be started.
    #[error("Failed to start the frame producer: {0}")]
    Spawn(String),

    /// The producer thread panicked.
    #[error("The frame producer panicked")]
    ProducerPanicked,
}
