/// Determinants below this are treated as zero.
const SINGULAR_EPS: f64 = 1e-12;

type Mat3 = [[f64; 3]; 3];

/// Homogeneous vertex matrix with the x, y and 1 rows of a triangle.
fn vertex_matrix(tri: &[[f64; 2]; 3]) -> Mat3 {
    [
        [tri[0][0], tri[1][0], tri[2][0]],
        [tri[0][1], tri[1][1], tri[2][1]],
        [1.0, 1.0, 1.0],
    ]
}

fn determinant(m: &Mat3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Inverse through the adjugate, `None` if the matrix is singular.
fn invert(m: &Mat3) -> Option<Mat3> {
    let det = determinant(m);
    if det.abs() < SINGULAR_EPS {
        return None;
    }
    let inv_det = 1.0 / det;

    let mut inv = [[0.0; 3]; 3];
    for (r, row) in inv.iter_mut().enumerate() {
        for (c, val) in row.iter_mut().enumerate() {
            // cofactor of element (c, r) gives the adjugate entry (r, c)
            let (r0, r1) = match c {
                0 => (1, 2),
                1 => (0, 2),
                _ => (0, 1),
            };
            let (c0, c1) = match r {
                0 => (1, 2),
                1 => (0, 2),
                _ => (0, 1),
            };
            let minor = m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0];
            let sign = if (r + c) % 2 == 0 { 1.0 } else { -1.0 };
            *val = sign * minor * inv_det;
        }
    }

    Some(inv)
}

/// Computes the 2x3 affine transform mapping the vertices of `from` onto the vertices of `to`.
///
/// The transform is `T · F⁻¹` where `F` and `T` are the 3x3 homogeneous vertex matrices of the
/// two triangles; only the top two rows are kept.
///
/// # Returns
///
/// `[a, b, c, d, e, f]` such that `u = a x + b y + c` and `v = d x + e y + f`, or `None` when
/// either triangle has zero area.
///
/// # Example
///
/// ```
/// use morphimate_imgproc::warp::affine_from_triangles;
///
/// let from = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
/// let to = [[2.0, 3.0], [4.0, 3.0], [2.0, 5.0]];
///
/// let m = affine_from_triangles(&from, &to).unwrap();
/// assert_eq!(m, [2.0, 0.0, 2.0, 0.0, 2.0, 3.0]);
/// ```
pub fn affine_from_triangles(from: &[[f64; 2]; 3], to: &[[f64; 2]; 3]) -> Option<[f64; 6]> {
    let dst = vertex_matrix(to);
    if determinant(&dst).abs() < SINGULAR_EPS {
        return None;
    }
    let src_inv = invert(&vertex_matrix(from))?;

    let mut m = [0.0; 6];
    for r in 0..2 {
        for c in 0..3 {
            m[r * 3 + c] = (0..3).map(|k| dst[r][k] * src_inv[k][c]).sum();
        }
    }

    Some(m)
}

/// Applies an affine transformation to a point.
pub fn transform_point(x: f64, y: f64, m: &[f64; 6]) -> (f64, f64) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}
