use nalgebra::{Matrix3, Vector3};

use crate::point::Point;

/// Denominators (and bottom-right entries) below this magnitude are treated
/// as zero.
const EPS_W: f64 = 1e-12;

/// A 3×3 plane transform.
///
/// Maps a point as
///
/// ```text
/// x' = (a·x + b·y + c) / (g·x + h·y + i)
/// y' = (d·x + e·y + f) / (g·x + h·y + i)
/// ```
///
/// Solver output always has `i == 1`; affine kinds also have `g == h == 0`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
    pub h: f64,
    pub i: f64,
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformMatrix {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 1.0,
        f: 0.0,
        g: 0.0,
        h: 0.0,
        i: 1.0,
    };

    /// Build from the eight solved coefficients `[a, b, c, d, e, f, g, h]`,
    /// fixing `i` to 1.
    pub fn from_params(p: [f64; 8]) -> Self {
        Self {
            a: p[0],
            b: p[1],
            c: p[2],
            d: p[3],
            e: p[4],
            f: p[5],
            g: p[6],
            h: p[7],
            i: 1.0,
        }
    }

    /// Row-major coefficients.
    pub fn rows(&self) -> [[f64; 3]; 3] {
        [
            [self.a, self.b, self.c],
            [self.d, self.e, self.f],
            [self.g, self.h, self.i],
        ]
    }

    pub fn is_affine(&self) -> bool {
        self.g == 0.0 && self.h == 0.0 && self.i == 1.0
    }

    /// Map a point through the transform.
    ///
    /// Returns `None` for points on the line at infinity of the mapping
    /// (denominator ~0) or when the result is not finite.
    pub fn apply(&self, p: Point) -> Option<Point> {
        let w = self.g * p.x + self.h * p.y + self.i;
        if !w.is_finite() || w.abs() < EPS_W {
            return None;
        }
        let x = (self.a * p.x + self.b * p.y + self.c) / w;
        let y = (self.d * p.x + self.e * p.y + self.f) / w;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(Point::new(x, y))
    }

    pub fn apply_all(&self, points: &[Point]) -> Vec<Option<Point>> {
        points.iter().map(|&p| self.apply(p)).collect()
    }

    /// Inverse mapping, normalized so that `i == 1`.
    ///
    /// `None` if the matrix is not invertible or the inverse cannot be
    /// normalized.
    pub fn inverse(&self) -> Option<Self> {
        let inv = Matrix3::from(*self).try_inverse()?;
        let scale = inv[(2, 2)];
        if !scale.is_finite() || scale.abs() < EPS_W {
            return None;
        }
        Some(Self::from(inv / scale))
    }

    /// Composition `other ∘ self`: apply `self` first, then `other`.
    pub fn then(&self, other: &Self) -> Self {
        Self::from(Matrix3::from(*other) * Matrix3::from(*self))
    }

    /// Homogeneous image of `p` without the perspective divide.
    pub fn apply_homogeneous(&self, p: Point) -> Vector3<f64> {
        Matrix3::from(*self) * Vector3::new(p.x, p.y, 1.0)
    }
}

impl From<TransformMatrix> for Matrix3<f64> {
    fn from(t: TransformMatrix) -> Self {
        Matrix3::new(t.a, t.b, t.c, t.d, t.e, t.f, t.g, t.h, t.i)
    }
}

impl From<Matrix3<f64>> for TransformMatrix {
    fn from(m: Matrix3<f64>) -> Self {
        Self {
            a: m[(0, 0)],
            b: m[(0, 1)],
            c: m[(0, 2)],
            d: m[(1, 0)],
            e: m[(1, 1)],
            f: m[(1, 2)],
            g: m[(2, 0)],
            h: m[(2, 1)],
            i: m[(2, 2)],
        }
    }
}

impl std::fmt::Display for TransformMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (k, row) in self.rows().iter().enumerate() {
            if k > 0 {
                writeln!(f)?;
            }
            write!(f, "[{:>14.6} {:>14.6} {:>14.6}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
