//! Linear systems for each transform kind.
//!
//! Each correspondence `(x, y) -> (X, Y)` contributes two rows: one for the
//! X equation and one for the Y equation. Point counts are checked by the
//! caller; the builders only read the first `N / 2` pairs.

use nalgebra::{SMatrix, SVector};

use crate::point::Point;

pub(crate) type System<const N: usize> = (SMatrix<f64, N, N>, SVector<f64, N>);

fn put_row<const N: usize>(m: &mut SMatrix<f64, N, N>, row: usize, values: [f64; N]) {
    for (c, v) in values.into_iter().enumerate() {
        m[(row, c)] = v;
    }
}

/// Unknowns `[a, b, c, d, e, f, g, h]` of the full homography.
pub(crate) fn perspective_system(src: &[Point], dst: &[Point]) -> System<8> {
    let mut m = SMatrix::<f64, 8, 8>::zeros();
    let mut rhs = SVector::<f64, 8>::zeros();
    for (i, (s, d)) in src.iter().zip(dst).take(4).enumerate() {
        let (x, y) = (s.x, s.y);
        let (tx, ty) = (d.x, d.y);
        put_row(&mut m, 2 * i, [x, y, 1.0, 0.0, 0.0, 0.0, -tx * x, -tx * y]);
        rhs[2 * i] = tx;
        put_row(&mut m, 2 * i + 1, [0.0, 0.0, 0.0, x, y, 1.0, -ty * x, -ty * y]);
        rhs[2 * i + 1] = ty;
    }
    (m, rhs)
}

/// Unknowns `[a, b, c, d, e, f]`; the perspective terms are fixed at zero.
pub(crate) fn affine_system(src: &[Point], dst: &[Point]) -> System<6> {
    let mut m = SMatrix::<f64, 6, 6>::zeros();
    let mut rhs = SVector::<f64, 6>::zeros();
    for (i, (s, d)) in src.iter().zip(dst).take(3).enumerate() {
        put_row(&mut m, 2 * i, [s.x, s.y, 1.0, 0.0, 0.0, 0.0]);
        rhs[2 * i] = d.x;
        put_row(&mut m, 2 * i + 1, [0.0, 0.0, 0.0, s.x, s.y, 1.0]);
        rhs[2 * i + 1] = d.y;
    }
    (m, rhs)
}

/// Unknowns `[p, q, tx, ty]` of the similarity
///
/// ```text
/// X = p·x - q·y + tx
/// Y = q·x + p·y + ty
/// ```
///
/// so the linear part `[[p, -q], [q, p]]` cannot shear or scale the axes
/// independently.
pub(crate) fn partial_affine_system(src: &[Point], dst: &[Point]) -> System<4> {
    let mut m = SMatrix::<f64, 4, 4>::zeros();
    let mut rhs = SVector::<f64, 4>::zeros();
    for (i, (s, d)) in src.iter().zip(dst).take(2).enumerate() {
        put_row(&mut m, 2 * i, [s.x, -s.y, 1.0, 0.0]);
        rhs[2 * i] = d.x;
        put_row(&mut m, 2 * i + 1, [s.y, s.x, 0.0, 1.0]);
        rhs[2 * i + 1] = d.y;
    }
    (m, rhs)
}
