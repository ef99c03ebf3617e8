use morphimate_image::{Image, ImageSize, Rgb8};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::MorphError;

/// An image with its control points, as handed to the frame producer.
#[derive(Debug, Clone, PartialEq)]
pub struct SuppliedImage {
    /// The image, already at the output size.
    pub image: Rgb8,
    /// The `[x, y]` control points, frame corners included.
    pub points: Vec<[i32; 2]>,
    /// A caption shown with the frames morphing away from this image.
    pub label: String,
}

/// A source of images to morph between.
///
/// Every call must return the same number of control points. Skipping unreadable inputs is the
/// supplier's job; an error ends the producer.
pub trait ImageSupplier: Send {
    /// Produce the next image at `size`.
    fn next_image(&mut self, size: ImageSize) -> Result<SuppliedImage, MorphError>;
}

/// Append the four corners of a `size` frame to `points`.
///
/// Warps only cover the convex hull of their points, so the corners make them cover the frame.
///
/// # Example
///
/// ```
/// use morphimate::image::ImageSize;
/// use morphimate::pipeline::with_frame_corners;
///
/// let points = with_frame_corners(vec![[2, 3]], ImageSize { width: 5, height: 4 });
/// assert_eq!(points, vec![[2, 3], [0, 0], [0, 3], [4, 0], [4, 3]]);
/// ```
pub fn with_frame_corners(mut points: Vec<[i32; 2]>, size: ImageSize) -> Vec<[i32; 2]> {
    let w = size.width as i32 - 1;
    let h = size.height as i32 - 1;
    points.extend([[0, 0], [0, h], [w, 0], [w, h]]);
    points
}

const STRIPES: usize = 10;
const MAX_DRAWS: usize = 1000;

/// Whether `p` is off every line through two of `points`.
fn in_general_position(points: &[[i32; 2]], p: [i32; 2]) -> bool {
    let [px, py] = [p[0] as i64, p[1] as i64];
    points.iter().enumerate().all(|(i, a)| {
        let [ax, ay] = [a[0] as i64, a[1] as i64];
        points[i + 1..].iter().all(|b| {
            let [bx, by] = [b[0] as i64, b[1] as i64];
            (bx - ax) * (py - ay) - (by - ay) * (px - ax) != 0
        })
    })
}

/// Synthetic supplier of images made of horizontal bands of random colour.
///
/// Landmarks are distinct and no three points, frame corners included, lie on one line, so every
/// triangle of the supplied points has a non-zero area. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct StripeSupplier {
    rng: StdRng,
    landmarks: usize,
}

impl StripeSupplier {
    /// The label of every supplied image.
    pub const LABEL: &'static str = "Random image examples";

    /// Create a supplier placing `landmarks` random points in every image.
    pub fn new(seed: u64, landmarks: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            landmarks,
        }
    }
}

impl ImageSupplier for StripeSupplier {
    fn next_image(&mut self, size: ImageSize) -> Result<SuppliedImage, MorphError> {
        if size.width < 3 || size.height < 3 {
            return Err(MorphError::Supplier(format!(
                "frame {size} is too small for interior landmarks"
            )));
        }

        let colours = (0..STRIPES)
            .map(|_| [self.rng.random(), self.rng.random(), self.rng.random()])
            .collect::<Vec<[u8; 3]>>();
        let band = size.height.div_ceil(STRIPES);
        let image = Image::from_fn(size, |_, y| colours[(y / band).min(STRIPES - 1)]);

        Ok(SuppliedImage {
            image,
            points: with_frame_corners(self.draw_landmarks(size)?, size),
            label: Self::LABEL.to_string(),
        })
    }
}

impl StripeSupplier {
    fn draw_landmarks(&mut self, size: ImageSize) -> Result<Vec<[i32; 2]>, MorphError> {
        let (w, h) = (size.width as i32 - 1, size.height as i32 - 1);
        let count = self.landmarks;
        let mut accepted = with_frame_corners(Vec::with_capacity(count + 4), size);

        for _ in 0..count {
            let rng = &mut self.rng;
            let p = (0..MAX_DRAWS)
                .map(|_| [rng.random_range(1..w), rng.random_range(1..h)])
                .find(|&p| in_general_position(&accepted, p))
                .ok_or_else(|| {
                    MorphError::Supplier(format!(
                        "no room for {count} landmarks in general position in a {size} frame"
                    ))
                })?;
            accepted.push(p);
        }

        Ok(accepted.split_off(4))
    }
}
