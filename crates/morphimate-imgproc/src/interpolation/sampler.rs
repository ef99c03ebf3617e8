use morphimate_image::{Image, ImageDtype, ImageError, ImageSize};
use serde::{Deserialize, Serialize};

use super::bicubic::{bicubic_interpolation, spline_coefficients};
use super::bilinear::bilinear_interpolation;

/// Interpolation mode used to resample an image at fractional coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    /// Interpolating cubic B-spline, C2 continuous.
    #[default]
    Bicubic,
    /// Bilinear interpolation between the four neighbouring pixels.
    Bilinear,
}

/// A continuous resampling function over one channel of an image.
///
/// Positions outside the grid are clamped to the nearest border position, so the sampler can be
/// queried anywhere without failing.
///
/// # Example
///
/// ```
/// use morphimate_image::{Image, ImageSize};
/// use morphimate_imgproc::interpolation::{ChannelSampler, InterpolationMode};
///
/// let image = Image::<u8, 3>::from_fn(ImageSize { width: 4, height: 4 }, |x, _| {
///     [x as u8 * 10, 0, 0]
/// });
///
/// let red = ChannelSampler::new(&image, 0, InterpolationMode::Bilinear).unwrap();
/// assert_eq!(red.sample(1.0, 1.5), 15.0);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSampler {
    mode: InterpolationMode,
    rows: usize,
    cols: usize,
    // spline coefficients for bicubic, raw samples for bilinear
    plane: Vec<f32>,
}

impl ChannelSampler {
    /// Build the sampler for `channel` of `image`.
    ///
    /// # Errors
    ///
    /// Fails if the image has no pixels or the channel index is out of bounds.
    pub fn new<const C: usize>(
        image: &Image<u8, C>,
        channel: usize,
        mode: InterpolationMode,
    ) -> Result<Self, ImageError> {
        if image.size().is_empty() {
            return Err(ImageError::EmptyImage(image.width(), image.height()));
        }

        let channel = image.channel(channel)?;
        let (rows, cols) = (channel.rows(), channel.cols());
        let samples = channel.as_slice().iter();

        let plane = match mode {
            InterpolationMode::Bicubic => {
                let samples = samples.map(|&v| v as f64).collect::<Vec<_>>();
                spline_coefficients(&samples, rows, cols)
            }
            InterpolationMode::Bilinear => samples.map(|&v| v as f32).collect(),
        };

        Ok(Self {
            mode,
            rows,
            cols,
            plane,
        })
    }

    /// Intensity at the real-valued position `(row, col)`.
    ///
    /// The result is not clamped to the pixel range: cubic splines may overshoot near edges.
    pub fn sample(&self, row: f32, col: f32) -> f32 {
        match self.mode {
            InterpolationMode::Bicubic => {
                bicubic_interpolation(&self.plane, self.rows, self.cols, row, col)
            }
            InterpolationMode::Bilinear => {
                bilinear_interpolation(&self.plane, self.rows, self.cols, row, col)
            }
        }
    }

    /// The interpolation mode of the sampler.
    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    /// Size of the sampled grid.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.cols,
            height: self.rows,
        }
    }
}

/// One [`ChannelSampler`] per channel of an image.
#[derive(Debug, Clone)]
pub struct ImageSampler {
    channels: Vec<ChannelSampler>,
    size: ImageSize,
}

impl ImageSampler {
    /// Build the samplers for every channel of `image`.
    pub fn new<const C: usize>(
        image: &Image<u8, C>,
        mode: InterpolationMode,
    ) -> Result<Self, ImageError> {
        let channels = (0..C)
            .map(|ch| ChannelSampler::new(image, ch, mode))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            channels,
            size: image.size(),
        })
    }

    /// The sampler of a single channel.
    pub fn channel(&self, channel: usize) -> Option<&ChannelSampler> {
        self.channels.get(channel)
    }

    /// Number of channels covered.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Size of the sampled image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Sample every channel at `(row, col)`, clamp to the pixel range and write into `pixel`.
    pub fn sample_into(&self, row: f32, col: f32, pixel: &mut [u8]) {
        pixel
            .iter_mut()
            .zip(self.channels.iter())
            .for_each(|(px, sampler)| *px = u8::from_f32(sampler.sample(row, col)));
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use morphimate_image::{Image, ImageError, ImageSize};

    use super::{ChannelSampler, ImageSampler, InterpolationMode};

    fn gradient() -> Image<u8, 3> {
        Image::from_fn([6, 5].into(), |x, y| {
            [(x * 40) as u8, (y * 50) as u8, ((x + y) * 20) as u8]
        })
    }

    #[test]
    fn sampler_hits_pixels() -> Result<(), ImageError> {
        let image = gradient();
        for mode in [InterpolationMode::Bicubic, InterpolationMode::Bilinear] {
            let sampler = ImageSampler::new(&image, mode)?;
            assert_eq!(sampler.num_channels(), 3);
            for y in 0..image.height() {
                for x in 0..image.width() {
                    let mut pixel = [0u8; 3];
                    sampler.sample_into(y as f32, x as f32, &mut pixel);
                    for (c, px) in pixel.iter().enumerate() {
                        assert_eq!(*px, image.get_pixel(x, y, c)?);
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    fn sampler_is_smooth_between_pixels() -> Result<(), ImageError> {
        let image = gradient();
        let green = ChannelSampler::new(&image, 1, InterpolationMode::Bicubic)?;
        let a = green.sample(1.0, 2.0);
        let b = green.sample(1.5, 2.0);
        let c = green.sample(2.0, 2.0);
        assert!(a < b && b < c);
        assert_relative_eq!(a, 50.0, epsilon = 1e-2);
        assert_relative_eq!(c, 100.0, epsilon = 1e-2);
        Ok(())
    }

    #[test]
    fn sampler_rejects_bad_input() {
        let empty = Image::<u8, 3>::new(ImageSize { width: 0, height: 3 }, vec![]);
        let empty = match empty {
            Ok(image) => image,
            Err(e) => panic!("empty image should be constructible: {e}"),
        };
        assert_eq!(
            ChannelSampler::new(&empty, 0, InterpolationMode::Bicubic).err(),
            Some(ImageError::EmptyImage(0, 3))
        );
        assert_eq!(
            ChannelSampler::new(&gradient(), 3, InterpolationMode::Bicubic).err(),
            Some(ImageError::ChannelIndexOutOfBounds(3, 3))
        );
    }

    #[test]
    fn sampler_single_pixel() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([1, 1].into(), vec![7, 8, 9])?;
        let sampler = ImageSampler::new(&image, InterpolationMode::Bicubic)?;
        let mut pixel = [0u8; 3];
        sampler.sample_into(-2.0, 3.0, &mut pixel);
        assert_eq!(pixel, [7, 8, 9]);
        Ok(())
    }
}
