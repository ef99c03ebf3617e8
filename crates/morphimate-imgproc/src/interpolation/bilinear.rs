/// Kernel for bilinear interpolation on a single-channel plane.
///
/// # Arguments
///
/// * `plane` - The row-major samples of size `rows x cols`.
/// * `v` - The y coordinate (row) of the position to interpolate.
/// * `u` - The x coordinate (column) of the position to interpolate.
///
/// # Returns
///
/// The interpolated value. The position is clamped to the plane first.
pub(crate) fn bilinear_interpolation(
    plane: &[f32],
    rows: usize,
    cols: usize,
    v: f32,
    u: f32,
) -> f32 {
    let u = u.clamp(0.0, (cols - 1) as f32);
    let v = v.clamp(0.0, (rows - 1) as f32);

    let iu0 = u.trunc() as usize;
    let iv0 = v.trunc() as usize;

    let frac_u = u - iu0 as f32;
    let frac_v = v - iv0 as f32;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let p00 = plane[iv0 * cols + iu0];
    let p01 = plane[iv0 * cols + iu1];
    let p10 = plane[iv1 * cols + iu0];
    let p11 = plane[iv1 * cols + iu1];

    p00 * w00 + p01 * w01 + p10 * w10 + p11 * w11
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::bilinear_interpolation;

    #[test]
    fn bilinear_midpoint() {
        let plane = [0.0, 10.0, 20.0, 30.0];
        assert_relative_eq!(bilinear_interpolation(&plane, 2, 2, 0.5, 0.5), 15.0);
        assert_relative_eq!(bilinear_interpolation(&plane, 2, 2, 0.0, 0.25), 2.5);
        assert_relative_eq!(bilinear_interpolation(&plane, 2, 2, 1.0, 1.0), 30.0);
    }

    #[test]
    fn bilinear_clamps() {
        let plane = [0.0, 10.0, 20.0, 30.0];
        assert_relative_eq!(bilinear_interpolation(&plane, 2, 2, -3.0, 7.0), 10.0);
    }
}
