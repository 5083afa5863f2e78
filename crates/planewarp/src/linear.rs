//! Dense square linear solve by Gauss-Jordan elimination.

use nalgebra::{SMatrix, SVector};

use crate::error::SolveError;

/// Pivots with a smaller magnitude mark the system as singular.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;

/// Solve `M x = rhs` by Gauss-Jordan elimination with partial pivoting.
///
/// `M` and `rhs` are copied; the caller's values are never touched. At each
/// column the row with the largest-magnitude entry is swapped in as pivot,
/// the pivot row is normalized and the column is eliminated from every other
/// row, leaving the solution in the right-hand side.
///
/// Returns [`SolveError::SingularMatrix`] as soon as a pivot's magnitude is
/// below `tolerance` (or is zero/non-finite), so no NaN/Inf is produced.
pub fn gauss_jordan_solve<const N: usize>(
    m: &SMatrix<f64, N, N>,
    rhs: &SVector<f64, N>,
    tolerance: f64,
) -> Result<SVector<f64, N>, SolveError> {
    let mut a = m.clone_owned();
    let mut b = rhs.clone_owned();

    for col in 0..N {
        // Partial pivot
        let mut pivot_row = col;
        let mut max_abs = a[(col, col)].abs();
        for row in col + 1..N {
            let v = a[(row, col)].abs();
            if v > max_abs {
                max_abs = v;
                pivot_row = row;
            }
        }
        if pivot_row != col {
            a.swap_rows(col, pivot_row);
            b.swap_rows(col, pivot_row);
        }

        let pivot = a[(col, col)];
        if pivot.abs() < tolerance || pivot == 0.0 || !pivot.is_finite() {
            return Err(SolveError::SingularMatrix { column: col, pivot });
        }

        for c in col..N {
            a[(col, c)] /= pivot;
        }
        b[col] /= pivot;

        // Eliminate above and below
        for row in 0..N {
            if row == col {
                continue;
            }
            let factor = a[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for c in col..N {
                let v = a[(col, c)];
                a[(row, c)] -= factor * v;
            }
            b[row] -= factor * b[col];
        }
    }

    Ok(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};

    #[test]
    fn solves_system_that_needs_row_swaps() {
        // Zero on the leading diagonal forces a pivot swap.
        let m = Matrix3::new(
            0.0, 2.0, 1.0,
            1.0, 1.0, 0.0,
            3.0, 0.0, 2.0,
        );
        let x_true = Vector3::new(1.0, -2.0, 0.5);
        let rhs = m * x_true;

        let x = gauss_jordan_solve(&m, &rhs, DEFAULT_PIVOT_TOLERANCE).unwrap();
        assert_relative_eq!(x, x_true, epsilon = 1e-12);
    }

    #[test]
    fn leaves_inputs_untouched() {
        let m = Matrix3::new(2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0);
        let rhs = Vector3::new(1.0, 2.0, 3.0);
        let (m_before, rhs_before) = (m, rhs);

        let x = gauss_jordan_solve(&m, &rhs, DEFAULT_PIVOT_TOLERANCE).unwrap();
        assert_eq!(m, m_before);
        assert_eq!(rhs, rhs_before);
        assert_relative_eq!(m * x, rhs, epsilon = 1e-12);
    }

    #[test]
    fn reports_singular_column() {
        // Third row is the sum of the first two.
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 5.0, 7.0, 9.0);
        let rhs = Vector3::new(1.0, 1.0, 2.0);

        let err = gauss_jordan_solve(&m, &rhs, DEFAULT_PIVOT_TOLERANCE).unwrap_err();
        match err {
            SolveError::SingularMatrix { column, pivot } => {
                assert_eq!(column, 2);
                assert!(pivot.abs() < DEFAULT_PIVOT_TOLERANCE);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn tolerance_is_respected() {
        let m = Matrix3::from_diagonal(&Vector3::new(1.0, 1e-9, 1.0));
        let rhs = Vector3::new(1.0, 1.0, 1.0);

        assert!(gauss_jordan_solve(&m, &rhs, DEFAULT_PIVOT_TOLERANCE).is_ok());
        assert!(gauss_jordan_solve(&m, &rhs, 1e-6).unwrap_err().is_singular());
    }

    #[test]
    fn zero_tolerance_still_rejects_exact_zero_pivot() {
        let m = Matrix3::from_diagonal(&Vector3::new(1.0, 0.0, 1.0));
        let rhs = Vector3::new(1.0, 1.0, 1.0);
        assert!(gauss_jordan_solve(&m, &rhs, 0.0).unwrap_err().is_singular());
    }
}
