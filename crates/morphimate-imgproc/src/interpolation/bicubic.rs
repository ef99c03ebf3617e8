//! Interpolating cubic B-spline.
//!
//! The pixel values are turned into B-spline coefficients with the recursive prefilter of
//! Unser et al., using a mirror-symmetric extension at the borders. Evaluating the spline at an
//! integer position reproduces the original pixel value.

/// Pole of the cubic B-spline prefilter, `sqrt(3) - 2`.
const POLE: f64 = -0.267_949_192_431_122_7;

/// Map an index outside `[0, n)` back into range by mirroring about the border samples.
pub(crate) fn mirror_index(k: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let k = k.rem_euclid(period);
    if k >= n as isize {
        (period - k) as usize
    } else {
        k as usize
    }
}

/// In-place conversion of one line of samples into B-spline coefficients.
fn prefilter_line(line: &mut [f64]) {
    let n = line.len();
    if n < 2 {
        return;
    }

    let z = POLE;
    let lambda = (1.0 - z) * (1.0 - 1.0 / z);
    line.iter_mut().for_each(|v| *v *= lambda);

    // causal initialization, exact for the mirror boundary
    let iz = 1.0 / z;
    let mut zn = z;
    let mut z2n = z.powi(n as i32 - 1);
    let mut sum = line[0] + z2n * line[n - 1];
    z2n *= z2n * iz;
    for v in line.iter().take(n - 1).skip(1) {
        sum += (zn + z2n) * v;
        zn *= z;
        z2n *= iz;
    }
    line[0] = sum / (1.0 - zn * zn);

    for k in 1..n {
        line[k] += z * line[k - 1];
    }

    // anti-causal pass
    line[n - 1] = (z / (z * z - 1.0)) * (line[n - 1] + z * line[n - 2]);
    for k in (0..n - 1).rev() {
        line[k] = z * (line[k + 1] - line[k]);
    }
}

/// Compute the 2D spline coefficients of a single-channel plane of size `rows x cols`.
pub(crate) fn spline_coefficients(plane: &[f64], rows: usize, cols: usize) -> Vec<f32> {
    let mut coeffs = plane.to_vec();

    coeffs.chunks_exact_mut(cols).for_each(prefilter_line);

    let mut column = vec![0.0; rows];
    for c in 0..cols {
        for (r, v) in column.iter_mut().enumerate() {
            *v = coeffs[r * cols + c];
        }
        prefilter_line(&mut column);
        for (r, v) in column.iter().enumerate() {
            coeffs[r * cols + c] = *v;
        }
    }

    coeffs.into_iter().map(|v| v as f32).collect()
}

/// Cubic B-spline weights for the four samples around a fractional offset `t` in `[0, 1)`.
fn bspline_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    let omt = 1.0 - t;
    [
        omt * omt * omt / 6.0,
        (4.0 - 6.0 * t2 + 3.0 * t3) / 6.0,
        (1.0 + 3.0 * t + 3.0 * t2 - 3.0 * t3) / 6.0,
        t3 / 6.0,
    ]
}

/// Evaluate the spline at `(v, u)` = `(row, col)`.
///
/// The query is clamped to the grid domain `[0, rows - 1] x [0, cols - 1]` first.
pub(crate) fn bicubic_interpolation(
    coeffs: &[f32],
    rows: usize,
    cols: usize,
    v: f32,
    u: f32,
) -> f32 {
    let u = u.clamp(0.0, (cols - 1) as f32);
    let v = v.clamp(0.0, (rows - 1) as f32);

    let iu = u.floor();
    let iv = v.floor();
    let wu = bspline_weights(u - iu);
    let wv = bspline_weights(v - iv);

    let (iu, iv) = (iu as isize, iv as isize);

    let mut acc = 0.0;
    for (j, wy) in wv.iter().enumerate() {
        let row = mirror_index(iv + j as isize - 1, rows) * cols;
        let mut row_acc = 0.0;
        for (i, wx) in wu.iter().enumerate() {
            let col = mirror_index(iu + i as isize - 1, cols);
            row_acc += wx * coeffs[row + col];
        }
        acc += wy * row_acc;
    }

    acc
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{bicubic_interpolation, mirror_index, spline_coefficients};

    #[test]
    fn mirror_index_wraps() {
        assert_eq!(mirror_index(-1, 4), 1);
        assert_eq!(mirror_index(-2, 4), 2);
        assert_eq!(mirror_index(4, 4), 2);
        assert_eq!(mirror_index(5, 4), 1);
        assert_eq!(mirror_index(3, 4), 3);
        assert_eq!(mirror_index(7, 1), 0);
    }

    #[test]
    fn spline_reproduces_samples() {
        let (rows, cols) = (4, 5);
        let plane = (0..rows * cols)
            .map(|i| ((i * 37) % 255) as f64)
            .collect::<Vec<_>>();
        let coeffs = spline_coefficients(&plane, rows, cols);

        for r in 0..rows {
            for c in 0..cols {
                let v = bicubic_interpolation(&coeffs, rows, cols, r as f32, c as f32);
                assert_relative_eq!(v, plane[r * cols + c] as f32, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn spline_keeps_constant_plane() {
        let plane = vec![42.0; 5 * 7];
        let coeffs = spline_coefficients(&plane, 5, 7);

        for (v, u) in [(0.5, 0.5), (2.25, 3.75), (4.0, 6.0), (3.9, 0.1)] {
            let s = bicubic_interpolation(&coeffs, 5, 7, v, u);
            assert_relative_eq!(s, 42.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn spline_between_neighbours_on_ramp() {
        let (rows, cols) = (3, 6);
        let plane = (0..rows * cols)
            .map(|i| (i % cols) as f64 * 10.0)
            .collect::<Vec<_>>();
        let coeffs = spline_coefficients(&plane, rows, cols);

        let v = bicubic_interpolation(&coeffs, rows, cols, 1.0, 2.5);
        assert!(v > 20.0 && v < 30.0, "got {v}");
    }

    #[test]
    fn spline_clamps_outside_domain() {
        let plane = vec![10.0, 20.0, 30.0, 40.0];
        let coeffs = spline_coefficients(&plane, 2, 2);

        let inside = bicubic_interpolation(&coeffs, 2, 2, 1.0, 1.0);
        let outside = bicubic_interpolation(&coeffs, 2, 2, 3.5, 9.0);
        assert_relative_eq!(inside, outside, epsilon = 1e-6);

        let corner = bicubic_interpolation(&coeffs, 2, 2, -4.0, -0.5);
        assert_relative_eq!(corner, 10.0, epsilon = 1e-3);
    }
}
