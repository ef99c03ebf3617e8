//! Delaunay triangulation of control points and point location.
//!
//! Points are inserted one at a time in index order (Bowyer-Watson) inside a large enclosing
//! triangle. Triangles attached to the enclosing triangle are dropped at the end and concave
//! pockets left along the boundary are closed, so the result covers the convex hull.
//!
//! All triangles are stored counter-clockwise in `(x, y)` and the construction only iterates
//! ordered containers, so the same points always give the same triangulation.

use std::collections::{BTreeMap, BTreeSet};

use morphimate_image::ImageSize;

use crate::error::GeometryError;

/// Tolerance of the point-in-triangle test, in squared pixels.
const EPS: f64 = 1e-9;

/// Size of the enclosing triangle relative to the point spread.
const SUPER_SCALE: f64 = 100.0;

/// A triangulation of a point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation {
    points: Vec<[f64; 2]>,
    triangles: Vec<[usize; 3]>,
}

/// Twice the signed area of `(a, b, c)`, positive when counter-clockwise.
fn orient(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Positive when `d` lies strictly inside the circumcircle of the counter-clockwise `(a, b, c)`.
fn in_circle(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2]) -> f64 {
    let (adx, ady) = (a[0] - d[0], a[1] - d[1]);
    let (bdx, bdy) = (b[0] - d[0], b[1] - d[1]);
    let (cdx, cdy) = (c[0] - d[0], c[1] - d[1]);

    (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        + (bdx * bdx + bdy * bdy) * (cdx * ady - adx * cdy)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady)
}

fn is_collinear(points: &[[i32; 2]]) -> bool {
    let p0 = points[0];
    let Some(p1) = points.iter().find(|&&p| p != p0) else {
        return true;
    };

    points.iter().all(|p| {
        let cross = (p1[0] as i64 - p0[0] as i64) * (p[1] as i64 - p0[1] as i64)
            - (p1[1] as i64 - p0[1] as i64) * (p[0] as i64 - p0[0] as i64);
        cross == 0
    })
}

/// Compute the Delaunay triangulation of a set of integer `[x, y]` points.
///
/// # Errors
///
/// [`GeometryError::DegenerateGeometry`] if fewer than three points are given or all of them lie
/// on one line.
///
/// # Example
///
/// ```
/// use morphimate_imgproc::triangulation::triangulate;
///
/// let tri = triangulate(&[[0, 0], [4, 0], [0, 4], [4, 4]]).unwrap();
/// assert_eq!(tri.len(), 2);
/// assert!(tri.locate([1.0, 1.0]).is_some());
/// assert!(tri.locate([5.0, 1.0]).is_none());
/// ```
pub fn triangulate(points: &[[i32; 2]]) -> Result<Triangulation, GeometryError> {
    if points.len() < 3 || is_collinear(points) {
        return Err(GeometryError::DegenerateGeometry {
            points: points.len(),
        });
    }

    let coords = points
        .iter()
        .map(|p| [p[0] as f64, p[1] as f64])
        .collect::<Vec<_>>();
    let n = coords.len();

    let (mut min, mut max) = ([f64::MAX; 2], [f64::MIN; 2]);
    for p in &coords {
        min = [min[0].min(p[0]), min[1].min(p[1])];
        max = [max[0].max(p[0]), max[1].max(p[1])];
    }
    let span = (max[0] - min[0]).max(max[1] - min[1]).max(1.0);
    let mid = [(min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0];
    let m = SUPER_SCALE * span;

    let mut vertices = coords.clone();
    vertices.push([mid[0] - m, mid[1] - m]);
    vertices.push([mid[0] + m, mid[1] - m]);
    vertices.push([mid[0], mid[1] + m]);

    let mut triangles = vec![[n, n + 1, n + 2]];

    for (i, &p) in coords.iter().enumerate() {
        // coincident points add nothing
        if coords[..i].contains(&p) {
            continue;
        }

        let mut keep = Vec::with_capacity(triangles.len());
        let mut cavity = Vec::new();
        for &t in &triangles {
            if in_circle(vertices[t[0]], vertices[t[1]], vertices[t[2]], p) > 0.0 {
                cavity.extend([(t[0], t[1]), (t[1], t[2]), (t[2], t[0])]);
            } else {
                keep.push(t);
            }
        }

        if cavity.is_empty() {
            continue;
        }

        let shared = cavity.iter().copied().collect::<BTreeSet<_>>();
        keep.extend(
            cavity
                .iter()
                .filter(|(a, b)| !shared.contains(&(*b, *a)))
                .map(|&(a, b)| [a, b, i]),
        );
        triangles = keep;
    }

    triangles.retain(|t| t.iter().all(|&v| v < n));

    let mut triangulation = Triangulation {
        points: coords,
        triangles,
    };
    triangulation.close_pockets();

    if triangulation.triangles.is_empty() {
        return Err(GeometryError::DegenerateGeometry { points: n });
    }

    Ok(triangulation)
}

impl Triangulation {
    /// The triangles as counter-clockwise index triples into [`Triangulation::points`].
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// The triangulated points.
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the triangulation has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The three vertex positions of triangle `t`.
    pub fn vertices(&self, t: usize) -> [[f64; 2]; 3] {
        let [a, b, c] = self.triangles[t];
        [self.points[a], self.points[b], self.points[c]]
    }

    fn contains(&self, t: usize, p: [f64; 2]) -> bool {
        let [a, b, c] = self.vertices(t);
        orient(a, b, p) >= -EPS && orient(b, c, p) >= -EPS && orient(c, a, p) >= -EPS
    }

    /// Find the triangle containing `point` (`[x, y]`), borders included.
    ///
    /// Returns the first matching triangle in triangle order, or `None` outside the convex hull.
    pub fn locate(&self, point: [f64; 2]) -> Option<usize> {
        (0..self.triangles.len()).find(|&t| self.contains(t, point))
    }

    /// Locate every pixel of a grid of the given size.
    ///
    /// The result is row-major and equal to calling [`Triangulation::locate`] on each pixel
    /// position, but only visits the bounding box of each triangle.
    pub fn rasterize(&self, size: ImageSize) -> Vec<Option<usize>> {
        let mut membership = vec![None; size.area()];
        if size.is_empty() {
            return membership;
        }

        let (max_x, max_y) = ((size.width - 1) as f64, (size.height - 1) as f64);

        for t in 0..self.triangles.len() {
            let v = self.vertices(t);
            let x_lo = v.iter().map(|p| p[0]).fold(f64::MAX, f64::min).ceil();
            let x_hi = v.iter().map(|p| p[0]).fold(f64::MIN, f64::max).floor();
            let y_lo = v.iter().map(|p| p[1]).fold(f64::MAX, f64::min).ceil();
            let y_hi = v.iter().map(|p| p[1]).fold(f64::MIN, f64::max).floor();

            if x_hi < 0.0 || y_hi < 0.0 || x_lo > max_x || y_lo > max_y {
                continue;
            }

            let (x0, x1) = (x_lo.max(0.0) as usize, x_hi.min(max_x) as usize);
            let (y0, y1) = (y_lo.max(0.0) as usize, y_hi.min(max_y) as usize);

            for y in y0..=y1 {
                let row = &mut membership[y * size.width..(y + 1) * size.width];
                for (x, slot) in row.iter_mut().enumerate().take(x1 + 1).skip(x0) {
                    if slot.is_none() && self.contains(t, [x as f64, y as f64]) {
                        *slot = Some(t);
                    }
                }
            }
        }

        membership
    }

    /// Add triangles at reflex boundary vertices until the boundary is convex.
    fn close_pockets(&mut self) {
        let limit = 4 * self.points.len();
        for _ in 0..limit {
            let edges = self
                .triangles
                .iter()
                .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
                .collect::<BTreeSet<_>>();

            let mut next = BTreeMap::new();
            for &(a, b) in &edges {
                if !edges.contains(&(b, a)) && next.insert(a, b).is_some() {
                    // pinched boundary, leave it as is
                    return;
                }
            }

            let ear = next.iter().find_map(|(&a, &b)| {
                let c = *next.get(&b)?;
                if c == a {
                    return None;
                }
                let (pa, pb, pc) = (self.points[a], self.points[b], self.points[c]);
                if orient(pa, pb, pc) >= -EPS {
                    return None;
                }
                let blocked = self.points.iter().enumerate().any(|(i, &p)| {
                    i != a
                        && i != b
                        && i != c
                        && p != pa
                        && p != pb
                        && p != pc
                        && orient(pa, pc, p) >= -EPS
                        && orient(pc, pb, p) >= -EPS
                        && orient(pb, pa, p) >= -EPS
                });
                (!blocked).then_some([a, c, b])
            });

            match ear {
                Some(t) => self.triangles.push(t),
                None => return,
            }
        }
    }
}
