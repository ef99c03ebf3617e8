use morphimate_image::{Image, ImageDtype, ImageError};

use crate::parallel;

/// Performs weighted addition of two images `src1` and `src2` with weights `alpha` and `beta`.
///
/// dst(x,y,c) = clamp(round(src1(x,y,c) * alpha + src2(x,y,c) * beta), 0, 255)
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `alpha` - Weight of the first image elements to be multiplied.
/// * `src2` - The second input image.
/// * `beta` - Weight of the second image elements to be multiplied.
/// * `dst` - The output image.
///
/// # Errors
///
/// Returns an error if the sizes of `src1`, `src2` and `dst` do not match.
pub fn add_weighted<const C: usize>(
    src1: &Image<u8, C>,
    alpha: f32,
    src2: &Image<u8, C>,
    beta: f32,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            dst.width(),
            dst.height(),
        ));
    }

    parallel::par_iter_rows_val_two(src1, src2, dst, |&src1_pixel, &src2_pixel, dst_pixel| {
        *dst_pixel = u8::from_f32(src1_pixel as f32 * alpha + src2_pixel as f32 * beta);
    });

    Ok(())
}

/// Linear cross-dissolve from `from` (at `t <= 0`) to `to` (at `t >= 1`).
///
/// The end points return exact copies of the inputs; in between the images are mixed with
/// weights `1 - t` and `t`.
///
/// # Example
///
/// ```
/// use morphimate_image::Image;
/// use morphimate_imgproc::enhance::cross_dissolve;
///
/// let black = Image::<u8, 3>::from_size_val([2, 2].into(), 0).unwrap();
/// let white = Image::<u8, 3>::from_size_val([2, 2].into(), 255).unwrap();
///
/// let grey = cross_dissolve(&black, &white, 0.5).unwrap();
/// assert_eq!(grey.as_slice()[0], 128);
/// assert_eq!(cross_dissolve(&black, &white, 1.0).unwrap(), white);
/// ```
pub fn cross_dissolve<const C: usize>(
    from: &Image<u8, C>,
    to: &Image<u8, C>,
    t: f32,
) -> Result<Image<u8, C>, ImageError> {
    if from.size() != to.size() {
        return Err(ImageError::InvalidImageSize(
            from.width(),
            from.height(),
            to.width(),
            to.height(),
        ));
    }

    if t <= 0.0 {
        return Ok(from.clone());
    }
    if t >= 1.0 {
        return Ok(to.clone());
    }

    let mut dst = Image::from_size_val(from.size(), 0u8)?;
    add_weighted(from, 1.0 - t, to, t, &mut dst)?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use morphimate_image::{Image, ImageError, ImageSize};

    use super::{add_weighted, cross_dissolve};

    #[test]
    fn add_weighted_clamps() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let a = Image::<u8, 1>::new(size, vec![200, 10])?;
        let b = Image::<u8, 1>::new(size, vec![200, 20])?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;
        add_weighted(&a, 1.0, &b, 1.0, &mut dst)?;
        assert_eq!(dst.as_slice(), &[255, 30]);

        add_weighted(&a, -1.0, &b, 0.5, &mut dst)?;
        assert_eq!(dst.as_slice(), &[0, 0]);
        Ok(())
    }

    #[test]
    fn add_weighted_size_mismatch() -> Result<(), ImageError> {
        let a = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;
        let b = Image::<u8, 1>::from_size_val([2, 3].into(), 0)?;
        let mut dst = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;
        assert_eq!(
            add_weighted(&a, 0.5, &b, 0.5, &mut dst),
            Err(ImageError::InvalidImageSize(2, 2, 2, 3))
        );
        Ok(())
    }

    #[test]
    fn cross_dissolve_boundaries() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let a = Image::<u8, 3>::from_fn(size, |x, y| [x as u8, y as u8, 255]);
        let b = Image::<u8, 3>::from_fn(size, |x, y| [100 + x as u8, 50 * y as u8, 0]);

        assert_eq!(cross_dissolve(&a, &b, 0.0)?, a);
        assert_eq!(cross_dissolve(&a, &b, -3.0)?, a);
        assert_eq!(cross_dissolve(&a, &b, 1.0)?, b);
        assert_eq!(cross_dissolve(&a, &b, 7.0)?, b);
        Ok(())
    }

    #[test]
    fn cross_dissolve_is_monotonic() -> Result<(), ImageError> {
        let a = Image::<u8, 3>::new([2, 1].into(), vec![0, 255, 30, 90, 90, 200])?;
        let b = Image::<u8, 3>::new([2, 1].into(), vec![255, 0, 30, 10, 91, 100])?;

        let mut previous = a.clone();
        for step in 1..=20 {
            let frame = cross_dissolve(&a, &b, step as f32 / 20.0)?;
            for i in 0..frame.as_slice().len() {
                let (x, y) = (a.as_slice()[i], b.as_slice()[i]);
                let (lo, hi) = (x.min(y), x.max(y));
                let v = frame.as_slice()[i];
                assert!(lo <= v && v <= hi);
                if a.as_slice()[i] <= b.as_slice()[i] {
                    assert!(v >= previous.as_slice()[i]);
                } else {
                    assert!(v <= previous.as_slice()[i]);
                }
            }
            previous = frame;
        }
        Ok(())
    }
}
