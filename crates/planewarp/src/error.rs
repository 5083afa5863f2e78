use crate::kind::TransformKind;

/// Which side of a correspondence a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSide {
    Source,
    Destination,
}

impl std::fmt::Display for PointSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Malformed solver call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgumentError {
    #[error(
        "{kind} transform needs {expected} point pairs, got {src} source and {dst} destination points"
    )]
    PointCount {
        kind: TransformKind,
        expected: usize,
        src: usize,
        dst: usize,
    },
    #[error("{side} point {index} has a non-finite coordinate")]
    NonFinite { side: PointSide, index: usize },
    #[error("pivot tolerance must be finite and non-negative, got {0}")]
    Tolerance(f64),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),
    /// Degenerate point configuration (collinear or duplicated points).
    #[error("matrix is singular or nearly singular: pivot {pivot:e} in column {column}")]
    SingularMatrix { column: usize, pivot: f64 },
}

impl SolveError {
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::SingularMatrix { .. })
    }
}
