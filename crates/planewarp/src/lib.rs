//! planewarp — planar transform solver for point correspondences.
//!
//! Given two to four source/destination point pairs, the solver computes the
//! 3×3 matrix of a plane-to-plane mapping:
//!
//! 1. **Perspective** – 4 pairs, full 8-parameter homography.
//! 2. **Affine** – 3 pairs, 6 parameters (g = h = 0).
//! 3. **Partial affine** – 2 pairs, uniform scale + rotation + translation.
//!
//! Each kind builds a small square linear system which is solved by
//! Gauss-Jordan elimination with partial pivoting. Degenerate configurations
//! (collinear or duplicated points) are reported as
//! [`SolveError::SingularMatrix`] instead of producing NaN/Inf output.
//!
//! # Public API
//! - [`solve`] / [`solve_with_config`] as the entry points
//! - [`TransformMatrix`] with point mapping, inversion and formatting helpers
//! - [`presets`] with the default point layouts and the sample dot grid

mod error;
pub mod format;
mod kind;
mod linear;
mod matrix;
mod point;
pub mod presets;
mod solver;
mod system;

pub use error::{ArgumentError, PointSide, SolveError};
pub use kind::{ParseKindError, TransformKind};
pub use linear::{gauss_jordan_solve, DEFAULT_PIVOT_TOLERANCE};
pub use matrix::TransformMatrix;
pub use point::Point;
pub use solver::{solve, solve_with_config, Correspondences, SolverConfig};
