use morphimate_image::{ImageSize, Rgb8};
use morphimate_imgproc::{
    enhance::cross_dissolve,
    interpolation::{ImageSampler, InterpolationMode},
    warp::warp_to_points,
};

use crate::error::MorphError;

/// One side of a morph: a raw image, its control points and the images derived from it.
///
/// The raw image and its samplers never change. The derived images are replaced whole.
#[derive(Debug, Clone)]
pub struct Endpoint {
    image: Rgb8,
    points: Vec<[i32; 2]>,
    sampler: ImageSampler,
    mode: InterpolationMode,
    warped: Rgb8,
    last_warped: Rgb8,
    tweened: Rgb8,
}

impl Endpoint {
    /// Create an endpoint, build the samplers of `image` and warp it onto `seed_points`.
    ///
    /// The seed warp fills `warped`, `last_warped` and `tweened`, so the first geometric step
    /// tweens away from the seed geometry.
    pub fn new(
        image: Rgb8,
        points: Vec<[i32; 2]>,
        mode: InterpolationMode,
        seed_points: &[[i32; 2]],
        size: ImageSize,
    ) -> Result<Self, MorphError> {
        let sampler = ImageSampler::new(&image, mode)?;
        let warped: Rgb8 = warp_to_points(&sampler, &points, seed_points, size)?;
        Ok(Self {
            image,
            points,
            sampler,
            mode,
            last_warped: warped.clone(),
            tweened: warped.clone(),
            warped,
        })
    }

    /// The raw image.
    pub fn image(&self) -> &Rgb8 {
        &self.image
    }

    /// The raw control points.
    pub fn points(&self) -> &[[i32; 2]] {
        &self.points
    }

    /// The interpolation mode of the samplers.
    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    /// The warp at the current morph position.
    pub fn warped(&self) -> &Rgb8 {
        &self.warped
    }

    /// The warp at the previous distinct morph position.
    pub fn last_warped(&self) -> &Rgb8 {
        &self.last_warped
    }

    /// The tween between `last_warped` and `warped`.
    pub fn tweened(&self) -> &Rgb8 {
        &self.tweened
    }

    pub(crate) fn warp_onto(
        &self,
        way_points: &[[i32; 2]],
        size: ImageSize,
    ) -> Result<Rgb8, MorphError> {
        Ok(warp_to_points(&self.sampler, &self.points, way_points, size)?)
    }

    pub(crate) fn install_warp(&mut self, warp: Rgb8) {
        self.last_warped = std::mem::replace(&mut self.warped, warp);
    }

    pub(crate) fn tween(&self, t: f32) -> Result<Rgb8, MorphError> {
        Ok(cross_dissolve(&self.last_warped, &self.warped, t)?)
    }

    pub(crate) fn install_tween(&mut self, tweened: Rgb8) {
        self.tweened = tweened;
    }
}
