use std::str::FromStr;

/// Family of plane transforms the solver can fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformKind {
    /// Full projective mapping (homography) from 4 correspondences.
    Perspective,
    /// Linear map plus translation from 3 correspondences.
    Affine,
    /// Uniform scale, rotation and translation from 2 correspondences.
    PartialAffine,
}

impl TransformKind {
    pub const ALL: [TransformKind; 3] = [Self::Perspective, Self::Affine, Self::PartialAffine];

    /// Number of point correspondences the kind is solved from.
    pub const fn required_points(self) -> usize {
        match self {
            Self::Perspective => 4,
            Self::Affine => 3,
            Self::PartialAffine => 2,
        }
    }

    /// Size of the square linear system (two equations per correspondence).
    pub const fn unknowns(self) -> usize {
        2 * self.required_points()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perspective => "perspective",
            Self::Affine => "affine",
            Self::PartialAffine => "partialAffine",
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`TransformKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transform kind '{0}' (expected perspective, affine or partialAffine)")]
pub struct ParseKindError(String);

impl FromStr for TransformKind {
    type Err = ParseKindError;

    /// Accepts the camelCase names plus `partial_affine` / `partial-affine`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perspective" => Ok(Self::Perspective),
            "affine" => Ok(Self::Affine),
            "partialAffine" | "partial_affine" | "partial-affine" => Ok(Self::PartialAffine),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_counts_per_kind() {
        assert_eq!(TransformKind::Perspective.required_points(), 4);
        assert_eq!(TransformKind::Affine.required_points(), 3);
        assert_eq!(TransformKind::PartialAffine.required_points(), 2);
        assert_eq!(TransformKind::Perspective.unknowns(), 8);
    }

    #[test]
    fn names_round_trip_through_display_and_serde() {
        for kind in TransformKind::ALL {
            assert_eq!(kind.to_string().parse::<TransformKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "projective".parse::<TransformKind>().unwrap_err();
        assert!(err.to_string().contains("projective"));
        assert_eq!(
            "partial-affine".parse::<TransformKind>().unwrap(),
            TransformKind::PartialAffine
        );
    }
}
