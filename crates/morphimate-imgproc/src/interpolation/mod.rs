//! Continuous resampling of image channels.
//!
//! Warping maps every output pixel to a real-valued position in the source image, so the source
//! must be readable between its pixels. This module provides the samplers used for that.
//!
//! # Interpolation Modes
//!
//! - **Bicubic**: interpolating cubic B-spline, smooth and exact at pixel centres
//! - **Bilinear**: linear interpolation between the four adjacent pixels
//!
//! Positions beyond the grid are clamped to the border in both modes.

mod bicubic;
mod bilinear;
mod sampler;

pub use sampler::{ChannelSampler, ImageSampler, InterpolationMode};
