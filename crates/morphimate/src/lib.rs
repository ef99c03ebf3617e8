#![deny(missing_docs)]
#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use morphimate_image as image;

#[doc(inline)]
pub use morphimate_imgproc as imgproc;

/// Settings of a morph animation.
pub mod config;

/// Error types of the morph session and the frame pipeline.
pub mod error;

pub mod pipeline;

pub mod session;

pub use crate::config::MorphConfig;
pub use crate::error::MorphError;
pub use crate::session::{MorphSession, SessionStats};
