//! Transform estimation from exact point correspondences.

use crate::error::{ArgumentError, PointSide, SolveError};
use crate::kind::TransformKind;
use crate::linear::{gauss_jordan_solve, DEFAULT_PIVOT_TOLERANCE};
use crate::matrix::TransformMatrix;
use crate::point::Point;
use crate::system::{affine_system, partial_affine_system, perspective_system};

/// Numerical settings for [`solve_with_config`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Pivots with a smaller magnitude make the solve fail as singular.
    pub pivot_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

/// A complete solver request: transform kind plus matched point lists.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Correspondences {
    pub kind: TransformKind,
    pub src: Vec<Point>,
    pub dst: Vec<Point>,
}

impl Correspondences {
    pub fn new(kind: TransformKind, src: Vec<Point>, dst: Vec<Point>) -> Self {
        Self { kind, src, dst }
    }

    pub fn solve(&self) -> Result<TransformMatrix, SolveError> {
        solve(self.kind, &self.src, &self.dst)
    }

    pub fn solve_with_config(&self, config: &SolverConfig) -> Result<TransformMatrix, SolveError> {
        solve_with_config(self.kind, &self.src, &self.dst, config)
    }
}

/// Compute the transform of `kind` mapping each `src[i]` onto `dst[i]`.
///
/// Both slices must hold exactly [`TransformKind::required_points`] finite
/// points. Degenerate configurations (duplicate points, collinear affine
/// points, three collinear perspective corners) fail with
/// [`SolveError::SingularMatrix`].
///
/// The pivot tolerance is absolute, so detection depends on coordinate
/// scale: exactly collinear points at coordinates around 1e6 can leave a
/// rounding-level pivot above `1e-12` and come back as a huge but finite
/// matrix. Raise [`SolverConfig::pivot_tolerance`] through
/// [`solve_with_config`] when working at such scales.
pub fn solve(
    kind: TransformKind,
    src: &[Point],
    dst: &[Point],
) -> Result<TransformMatrix, SolveError> {
    solve_with_config(kind, src, dst, &SolverConfig::default())
}

pub fn solve_with_config(
    kind: TransformKind,
    src: &[Point],
    dst: &[Point],
    config: &SolverConfig,
) -> Result<TransformMatrix, SolveError> {
    let result = validate(kind, src, dst, config).and_then(|()| {
        let tol = config.pivot_tolerance;
        match kind {
            TransformKind::Perspective => {
                let (m, rhs) = perspective_system(src, dst);
                let p = gauss_jordan_solve(&m, &rhs, tol)?;
                Ok(TransformMatrix::from_params([
                    p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7],
                ]))
            }
            TransformKind::Affine => {
                let (m, rhs) = affine_system(src, dst);
                let p = gauss_jordan_solve(&m, &rhs, tol)?;
                Ok(TransformMatrix::from_params([
                    p[0], p[1], p[2], p[3], p[4], p[5], 0.0, 0.0,
                ]))
            }
            TransformKind::PartialAffine => {
                let (m, rhs) = partial_affine_system(src, dst);
                let p = gauss_jordan_solve(&m, &rhs, tol)?;
                let (scale_cos, scale_sin, tx, ty) = (p[0], p[1], p[2], p[3]);
                Ok(TransformMatrix::from_params([
                    scale_cos, -scale_sin, tx, scale_sin, scale_cos, ty, 0.0, 0.0,
                ]))
            }
        }
    });

    match &result {
        Ok(t) => tracing::trace!(%kind, matrix = ?t.rows(), "transform solved"),
        Err(e) => tracing::debug!(%kind, error = %e, "transform solve rejected"),
    }
    result
}

fn validate(
    kind: TransformKind,
    src: &[Point],
    dst: &[Point],
    config: &SolverConfig,
) -> Result<(), SolveError> {
    let expected = kind.required_points();
    if src.len() != expected || dst.len() != expected {
        return Err(ArgumentError::PointCount {
            kind,
            expected,
            src: src.len(),
            dst: dst.len(),
        }
        .into());
    }
    for (side, points) in [(PointSide::Source, src), (PointSide::Destination, dst)] {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ArgumentError::NonFinite { side, index }.into());
        }
    }
    let tol = config.pivot_tolerance;
    if !tol.is_finite() || tol < 0.0 {
        return Err(ArgumentError::Tolerance(tol).into());
    }
    Ok(())
}
