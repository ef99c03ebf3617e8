//! The morph session: two endpoints, their cached warps and the sliding window between them.
//!
//! A [`MorphSession`] is driven by three independent parameters:
//!
//! - `morph`: geometric position between the source (0) and target (1) control points
//! - `tween`: temporal position between the previous and the current warp of each endpoint
//! - `blend`: photometric cross-dissolve from the source (0) to the target (1)
//!
//! Warps are only recomputed when the morph position changes, and tweens when the tween position
//! changes. Blending is cheap and always recomputed.

mod cache;
mod endpoint;

pub use cache::{CacheState, Recompute};
pub use endpoint::Endpoint;

use morphimate_image::{ImageSize, Rgb8};
use morphimate_imgproc::{enhance::cross_dissolve, interpolation::InterpolationMode, GeometryError};

use crate::config::MorphConfig;
use crate::error::MorphError;

/// Counts of the images computed by a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Number of endpoint warps.
    pub warps: usize,
    /// Number of endpoint tweens.
    pub tweens: usize,
    /// Number of blended output images.
    pub blends: usize,
    /// Number of window advances.
    pub advances: usize,
}

/// Morphs a source image into a target image.
///
/// # Example
///
/// ```
/// use morphimate::image::{Image, ImageSize};
/// use morphimate::imgproc::interpolation::InterpolationMode;
/// use morphimate::MorphSession;
///
/// let size = ImageSize { width: 8, height: 8 };
/// let black = Image::<u8, 3>::from_size_val(size, 0).unwrap();
/// let white = Image::<u8, 3>::from_size_val(size, 255).unwrap();
/// let points = vec![[3, 4], [0, 0], [0, 7], [7, 0], [7, 7]];
///
/// let mut session = MorphSession::new(
///     (black.clone(), points.clone()),
///     (white, points),
///     size,
///     InterpolationMode::Bicubic,
/// )
/// .unwrap();
///
/// assert_eq!(session.morph(0.0, 0.0, 0.0).unwrap(), black);
/// assert_eq!(session.morph(0.0, 0.5, 0.0).unwrap().as_slice()[0], 128);
/// ```
#[derive(Debug, Clone)]
pub struct MorphSession {
    source: Endpoint,
    target: Endpoint,
    size: ImageSize,
    mode: InterpolationMode,
    cache: CacheState,
    stats: SessionStats,
}

fn check_lengths(expected: usize, got: usize) -> Result<(), MorphError> {
    if expected != got {
        return Err(GeometryError::PointSetLengthMismatch(expected, got).into());
    }
    Ok(())
}

impl MorphSession {
    /// Create a session morphing `source` into `target` on an output grid of `size`.
    ///
    /// Each side is an image and its `[x, y]` control points. Both images are warped onto the
    /// source points right away, so the first geometric step tweens away from the source
    /// geometry.
    ///
    /// # Errors
    ///
    /// * [`GeometryError::PointSetLengthMismatch`] if the point sets have different lengths.
    /// * [`morphimate_image::ImageError::EmptyImage`] if an image or `size` is empty.
    /// * Any triangulation or warping error of the source points.
    pub fn new(
        source: (Rgb8, Vec<[i32; 2]>),
        target: (Rgb8, Vec<[i32; 2]>),
        size: ImageSize,
        mode: InterpolationMode,
    ) -> Result<Self, MorphError> {
        check_lengths(source.1.len(), target.1.len())?;
        if size.is_empty() {
            return Err(morphimate_image::ImageError::EmptyImage(size.width, size.height).into());
        }

        let (source_image, source_points) = source;
        let target = Endpoint::new(target.0, target.1, mode, &source_points, size)?;
        let source = Endpoint::new(
            source_image,
            source_points.clone(),
            mode,
            &source_points,
            size,
        )?;

        Ok(Self {
            source,
            target,
            size,
            mode,
            cache: CacheState::default(),
            stats: SessionStats {
                warps: 2,
                ..Default::default()
            },
        })
    }

    /// Create a session with the output size and interpolation of `config`.
    pub fn from_config(
        source: (Rgb8, Vec<[i32; 2]>),
        target: (Rgb8, Vec<[i32; 2]>),
        config: &MorphConfig,
    ) -> Result<Self, MorphError> {
        config.validate()?;
        Self::new(source, target, config.size, config.interpolation)
    }

    /// Render the output image at the given positions.
    ///
    /// # Arguments
    ///
    /// * `morph_percent` - Geometric position, 0 at the source points and 1 at the target points.
    /// * `blend_percent` - Cross-dissolve weight of the target image.
    /// * `tween_percent` - Temporal position between the previous and the current warp.
    ///
    /// # Errors
    ///
    /// Propagates the triangulation and warping errors of the way-points. On error the session
    /// keeps its previous positions, so the next call retries.
    pub fn morph(
        &mut self,
        morph_percent: f32,
        blend_percent: f32,
        tween_percent: f32,
    ) -> Result<Rgb8, MorphError> {
        let plan = self.cache.update(morph_percent, tween_percent);

        if plan.geometry {
            let way_points = self.way_points(morph_percent);
            log::debug!("re-warping both endpoints at morph position {morph_percent}");

            let source = self.source.warp_onto(&way_points, self.size)?;
            let target = self.target.warp_onto(&way_points, self.size)?;
            self.source.install_warp(source);
            self.target.install_warp(target);
            self.stats.warps += 2;
            self.cache.commit_geometry(morph_percent);
        }

        if plan.temporal {
            log::debug!("re-tweening both endpoints at tween position {tween_percent}");

            let source = self.source.tween(tween_percent)?;
            let target = self.target.tween(tween_percent)?;
            self.source.install_tween(source);
            self.target.install_tween(target);
            self.stats.tweens += 2;
            self.cache.commit_temporal(tween_percent);
        }

        self.blend(blend_percent)
    }

    /// Interpolate the control points at geometric position `percent`.
    ///
    /// The boundaries return the source and target points exactly. In between, coordinates are
    /// truncated toward zero.
    pub fn way_points(&self, percent: f32) -> Vec<[i32; 2]> {
        if percent <= 0.0 {
            return self.source.points().to_vec();
        }
        if percent >= 1.0 {
            return self.target.points().to_vec();
        }

        let p = percent as f64;
        self.source
            .points()
            .iter()
            .zip(self.target.points())
            .map(|(s, t)| {
                let x = t[0] as f64 * p + s[0] as f64 * (1.0 - p);
                let y = t[1] as f64 * p + s[1] as f64 * (1.0 - p);
                [x as i32, y as i32]
            })
            .collect()
    }

    /// Cross-dissolve the tweened source into the tweened target.
    pub fn blend(&mut self, percent: f32) -> Result<Rgb8, MorphError> {
        let blended = cross_dissolve(self.source.tweened(), self.target.tweened(), percent)?;
        self.stats.blends += 1;
        Ok(blended)
    }

    /// Slide the window: the target becomes the source and `image` becomes the new target.
    ///
    /// The old target keeps its cached warps. The new target is warped onto the points of the
    /// new source, as at construction. The next call to [`MorphSession::morph`] re-warps both
    /// endpoints, even at an unchanged morph position.
    ///
    /// # Errors
    ///
    /// [`GeometryError::PointSetLengthMismatch`] if `points` does not match the session's point
    /// count, or any warping error of the new target. The session is left untouched in that case.
    pub fn advance_window(&mut self, image: Rgb8, points: Vec<[i32; 2]>) -> Result<(), MorphError> {
        check_lengths(self.target.points().len(), points.len())?;

        let next = Endpoint::new(image, points, self.mode, self.target.points(), self.size)?;
        self.stats.warps += 1;
        self.source = std::mem::replace(&mut self.target, next);
        self.cache.invalidate_geometry();
        self.stats.advances += 1;

        log::info!("advanced morph window ({} so far)", self.stats.advances);

        Ok(())
    }

    /// The source endpoint.
    pub fn source(&self) -> &Endpoint {
        &self.source
    }

    /// The target endpoint.
    pub fn target(&self) -> &Endpoint {
        &self.target
    }

    /// The output image size.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The interpolation mode of both endpoints.
    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    /// Counts of the images computed so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The last applied morph position.
    pub fn morph_position(&self) -> Option<f32> {
        self.cache.morph_position()
    }

    /// The last applied tween position.
    pub fn tween_position(&self) -> Option<f32> {
        self.cache.tween_position()
    }
}
