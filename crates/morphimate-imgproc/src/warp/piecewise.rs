use morphimate_image::{Image, ImageError, ImageSize};

use super::affine::{affine_from_triangles, transform_point};
use crate::error::GeometryError;
use crate::interpolation::ImageSampler;
use crate::parallel;
use crate::triangulation::triangulate;

fn to_f64(p: [i32; 2]) -> [f64; 2] {
    [p[0] as f64, p[1] as f64]
}

/// Warps an image so that its control points move onto a destination point set.
///
/// # Arguments
///
/// * `src` - The per-channel samplers of the source image.
/// * `src_points` - The `[x, y]` control points of the source image.
/// * `dst_points` - The `[x, y]` destination points, index-aligned with `src_points`.
/// * `dst` - The output image. Pixels outside the convex hull of `dst_points` are not written.
///
/// # Errors
///
/// * [`GeometryError::PointSetLengthMismatch`] if the point sets have different lengths.
/// * [`GeometryError::DegenerateGeometry`] if `dst_points` cannot be triangulated.
/// * [`GeometryError::SingularTransform`] if a triangle has zero area in either image.
pub fn warp_piecewise_affine<const C: usize>(
    src: &ImageSampler,
    src_points: &[[i32; 2]],
    dst_points: &[[i32; 2]],
    dst: &mut Image<u8, C>,
) -> Result<(), GeometryError> {
    if src_points.len() != dst_points.len() {
        return Err(GeometryError::PointSetLengthMismatch(
            dst_points.len(),
            src_points.len(),
        ));
    }

    if src.num_channels() != C {
        return Err(ImageError::ChannelCountMismatch(C, src.num_channels()).into());
    }

    let triangulation = triangulate(dst_points)?;

    // one transform per triangle, from output coordinates back into the source
    let transforms = triangulation
        .triangles()
        .iter()
        .enumerate()
        .map(|(t, &[a, b, c])| {
            let to = [
                to_f64(src_points[a]),
                to_f64(src_points[b]),
                to_f64(src_points[c]),
            ];
            affine_from_triangles(&triangulation.vertices(t), &to)
                .ok_or(GeometryError::SingularTransform { triangle: t })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let membership = triangulation.rasterize(dst.size());

    log::trace!("warping {} triangles onto {}", transforms.len(), dst.size());

    parallel::par_iter_rows_labelled(dst, &membership, |x, y, label, dst_pixel| {
        if let Some(t) = label {
            let (u, v) = transform_point(x as f64, y as f64, &transforms[*t]);
            src.sample_into(v as f32, u as f32, dst_pixel);
        }
    });

    Ok(())
}

/// Allocates a black image of `size` and warps `src` onto it.
///
/// See [`warp_piecewise_affine`].
pub fn warp_to_points<const C: usize>(
    src: &ImageSampler,
    src_points: &[[i32; 2]],
    dst_points: &[[i32; 2]],
    size: ImageSize,
) -> Result<Image<u8, C>, GeometryError> {
    let mut dst = Image::from_size_val(size, 0u8)?;
    warp_piecewise_affine(src, src_points, dst_points, &mut dst)?;
    Ok(dst)
}
