//! Default point layouts and the sample dot grid used to visualize a warp.

use crate::kind::TransformKind;
use crate::point::Point;

/// Side length of the square working area the default layouts are placed in.
pub const CANVAS_SIZE: f64 = 400.0;

/// Upper bound on the total number of points [`sample_grid`] will produce.
pub const MAX_GRID_SAMPLES: usize = 4_000_000;

/// Starting correspondences for `kind` on a [`CANVAS_SIZE`] square:
/// the four corners, a triangle, or a horizontal segment through the middle.
pub fn default_points(kind: TransformKind) -> Vec<Point> {
    let s = CANVAS_SIZE;
    match kind {
        TransformKind::Perspective => vec![
            Point::new(0.0, 0.0),
            Point::new(s, 0.0),
            Point::new(s, s),
            Point::new(0.0, s),
        ],
        TransformKind::Affine => vec![
            Point::new(s / 2.0, 0.0),
            Point::new(s, s),
            Point::new(0.0, s),
        ],
        TransformKind::PartialAffine => vec![Point::new(0.0, s / 2.0), Point::new(s, s / 2.0)],
    }
}

/// Regular grid covering `[-padding, size + padding]` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub padding: f64,
    pub size: f64,
    pub step: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            padding: 400.0,
            size: CANVAS_SIZE,
            step: 20.0,
        }
    }
}

impl GridSpec {
    /// Samples per axis (inclusive of both ends).
    ///
    /// Zero for an unusable step, or when the full grid would exceed
    /// [`MAX_GRID_SAMPLES`] points.
    pub fn samples_per_axis(&self) -> usize {
        let span = self.size + 2.0 * self.padding;
        if !(self.step.is_finite() && self.step > 0.0) || !span.is_finite() || span < 0.0 {
            return 0;
        }
        // Tolerate accumulated error on the closing sample.
        let n = (span / self.step + 1e-9).floor() + 1.0;
        if !n.is_finite() || n * n > MAX_GRID_SAMPLES as f64 {
            return 0;
        }
        n as usize
    }
}

/// Grid points in x-major order (all y values for the first x, then the next x).
pub fn sample_grid(spec: &GridSpec) -> Vec<Point> {
    let n = spec.samples_per_axis();
    let start = -spec.padding;
    let mut out = Vec::with_capacity(n.saturating_mul(n));
    for ix in 0..n {
        let x = start + ix as f64 * spec.step;
        for iy in 0..n {
            out.push(Point::new(x, start + iy as f64 * spec.step));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layouts_match_required_counts() {
        for kind in TransformKind::ALL {
            assert_eq!(default_points(kind).len(), kind.required_points());
        }
        assert_eq!(
            default_points(TransformKind::Affine)[0],
            Point::new(200.0, 0.0)
        );
    }

    #[test]
    fn default_grid_spans_padded_canvas() {
        let grid = sample_grid(&GridSpec::default());
        // -400..=800 step 20 -> 61 samples per axis
        assert_eq!(grid.len(), 61 * 61);
        assert_eq!(grid[0], Point::new(-400.0, -400.0));
        assert_eq!(grid[1], Point::new(-400.0, -380.0));
        assert_eq!(*grid.last().unwrap(), Point::new(800.0, 800.0));
    }

    #[test]
    fn unusable_step_gives_empty_grid() {
        for step in [0.0, -5.0, f64::NAN] {
            let spec = GridSpec {
                step,
                ..GridSpec::default()
            };
            assert!(sample_grid(&spec).is_empty());
        }
    }

    #[test]
    fn oversized_grids_are_empty() {
        let huge_padding = GridSpec {
            padding: 1e12,
            ..GridSpec::default()
        };
        assert_eq!(huge_padding.samples_per_axis(), 0);
        assert!(sample_grid(&huge_padding).is_empty());

        let tiny_step = GridSpec {
            step: 1e-9,
            ..GridSpec::default()
        };
        assert!(sample_grid(&tiny_step).is_empty());

        // Allocatable but far beyond the cap.
        let wide = GridSpec {
            padding: 1e6,
            ..GridSpec::default()
        };
        assert!(sample_grid(&wide).is_empty());
    }

    #[test]
    fn grid_at_sample_cap_is_kept() {
        // 0..=1999 step 1 -> 2000 x 2000 == MAX_GRID_SAMPLES
        let spec = GridSpec {
            padding: 0.0,
            size: 1999.0,
            step: 1.0,
        };
        assert_eq!(spec.samples_per_axis(), 2000);
        let over = GridSpec { size: 2000.0, ..spec };
        assert_eq!(over.samples_per_axis(), 0);
    }

    #[test]
    fn step_that_does_not_divide_span_stops_inside() {
        let spec = GridSpec {
            padding: 0.0,
            size: 10.0,
            step: 3.0,
        };
        let grid = sample_grid(&spec);
        assert_eq!(grid.len(), 16);
        assert_eq!(*grid.last().unwrap(), Point::new(9.0, 9.0));
    }
}
