//! planewarp CLI — solve and apply plane transforms from point correspondences.

use clap::{Args, Parser, Subcommand, ValueEnum};
use planewarp::format::{css_matrix3d, svg_matrix};
use planewarp::presets::{default_points, sample_grid, GridSpec, MAX_GRID_SAMPLES};
use planewarp::{Correspondences, Point, SolverConfig, TransformKind, TransformMatrix};
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "planewarp")]
#[command(about = "Solve perspective, affine and partial-affine transforms from point pairs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the transform mapping source points onto destination points.
    Solve {
        #[command(flatten)]
        points: CliPointsArgs,

        /// Output representation of the matrix.
        #[arg(long, value_enum, default_value_t = OutputFormatArg::Json)]
        format: OutputFormatArg,

        /// Write the output to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Map points through the solved transform (null for points at infinity).
    Project {
        #[command(flatten)]
        points: CliPointsArgs,

        /// Point to map, as "x,y". Repeat for several points.
        #[arg(long = "point", value_parser = parse_point, allow_hyphen_values = true, required = true)]
        targets: Vec<Point>,
    },

    /// Print the default point layout of a transform kind (JSON).
    Defaults {
        #[arg(long, value_enum, default_value_t = KindArg::Perspective)]
        kind: KindArg,
    },

    /// Remap the sample dot grid through the solved transform (JSON).
    Grid {
        #[command(flatten)]
        points: CliPointsArgs,

        #[command(flatten)]
        grid: CliGridArgs,

        /// Write the output to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct CliPointsArgs {
    /// Transform kind. Ignored when --input is given.
    #[arg(long, value_enum, default_value_t = KindArg::Perspective)]
    kind: KindArg,

    /// Source point as "x,y" (repeat per point). Defaults to the kind's preset layout.
    #[arg(long = "src", value_parser = parse_point, allow_hyphen_values = true)]
    src: Vec<Point>,

    /// Destination point as "x,y" (repeat per point). Defaults to the source points.
    #[arg(long = "dst", value_parser = parse_point, allow_hyphen_values = true)]
    dst: Vec<Point>,

    /// JSON file holding {"kind", "src", "dst"}.
    #[arg(long, conflicts_with_all = ["src", "dst"])]
    input: Option<PathBuf>,

    /// JSON file with solver settings, e.g. {"pivot_tolerance": 1e-12}.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Args)]
struct CliGridArgs {
    /// Margin added around the canvas on every side.
    #[arg(long, default_value_t = 400.0)]
    padding: f64,

    /// Canvas side length.
    #[arg(long, default_value_t = 400.0)]
    size: f64,

    /// Spacing between grid samples.
    #[arg(long, default_value_t = 20.0)]
    step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Perspective,
    Affine,
    PartialAffine,
}

impl KindArg {
    fn to_core(self) -> TransformKind {
        match self {
            Self::Perspective => TransformKind::Perspective,
            Self::Affine => TransformKind::Affine,
            Self::PartialAffine => TransformKind::PartialAffine,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormatArg {
    /// {"a": .., ..., "i": ..}
    Json,
    /// Three whitespace-aligned rows.
    Rows,
    /// CSS matrix3d(...)
    Css,
    /// SVG matrix(...) (affine part only)
    Svg,
}

#[derive(Debug, serde::Serialize)]
struct GridSample {
    src: Point,
    dst: Option<Point>,
}

/// Parse "x,y" (whitespace around either number is allowed).
fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid x in {s:?}: {e}"))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

impl CliPointsArgs {
    fn to_request(&self) -> CliResult<Correspondences> {
        if let Some(path) = &self.input {
            let text = read_file(path)?;
            let request: Correspondences = serde_json::from_str(&text).map_err(|e| -> CliError {
                format!("invalid correspondences in {}: {}", path.display(), e).into()
            })?;
            return Ok(request);
        }

        let kind = self.kind.to_core();
        let src = if self.src.is_empty() {
            default_points(kind)
        } else {
            self.src.clone()
        };
        let dst = if self.dst.is_empty() {
            src.clone()
        } else {
            self.dst.clone()
        };
        Ok(Correspondences::new(kind, src, dst))
    }

    fn to_config(&self) -> CliResult<SolverConfig> {
        let Some(path) = &self.config else {
            return Ok(SolverConfig::default());
        };
        let text = read_file(path)?;
        serde_json::from_str(&text).map_err(|e| -> CliError {
            format!("invalid solver config in {}: {}", path.display(), e).into()
        })
    }

    fn solve(&self) -> CliResult<(Correspondences, TransformMatrix)> {
        let request = self.to_request()?;
        let config = self.to_config()?;
        tracing::info!(
            "Solving {} transform from {} point pairs",
            request.kind,
            request.src.len()
        );
        let t = request.solve_with_config(&config)?;
        Ok((request, t))
    }
}

impl From<CliGridArgs> for GridSpec {
    fn from(args: CliGridArgs) -> Self {
        GridSpec {
            padding: args.padding,
            size: args.size,
            step: args.step,
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            points,
            format,
            out,
        } => run_solve(&points, format, out.as_deref()),
        Commands::Project { points, targets } => run_project(&points, &targets),
        Commands::Defaults { kind } => run_defaults(kind),
        Commands::Grid { points, grid, out } => run_grid(&points, grid, out.as_deref()),
    }
}

fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| -> CliError { format!("failed to read {}: {}", path.display(), e).into() })
}

fn emit(text: &str, out: Option<&Path>) -> CliResult<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).map_err(|e| -> CliError {
                format!("failed to write {}: {}", path.display(), e).into()
            })?;
            tracing::info!("Output written to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn render(t: &TransformMatrix, format: OutputFormatArg) -> CliResult<String> {
    Ok(match format {
        OutputFormatArg::Json => serde_json::to_string_pretty(t)?,
        OutputFormatArg::Rows => t.to_string(),
        OutputFormatArg::Css => css_matrix3d(t),
        OutputFormatArg::Svg => svg_matrix(t),
    })
}

// ── solve ──────────────────────────────────────────────────────────────

fn run_solve(args: &CliPointsArgs, format: OutputFormatArg, out: Option<&Path>) -> CliResult<()> {
    let (request, t) = args.solve()?;
    if format == OutputFormatArg::Svg && !t.is_affine() {
        tracing::warn!(
            "{} transform has perspective terms; SVG output drops them",
            request.kind
        );
    }
    emit(&render(&t, format)?, out)
}

// ── project ────────────────────────────────────────────────────────────

fn run_project(args: &CliPointsArgs, targets: &[Point]) -> CliResult<()> {
    let (_, t) = args.solve()?;
    let mapped = t.apply_all(targets);
    let n_infinite = mapped.iter().filter(|p| p.is_none()).count();
    if n_infinite > 0 {
        tracing::warn!("{} of {} points map to infinity", n_infinite, targets.len());
    }
    emit(&serde_json::to_string_pretty(&mapped)?, None)
}

// ── defaults ───────────────────────────────────────────────────────────

fn run_defaults(kind: KindArg) -> CliResult<()> {
    let points = default_points(kind.to_core());
    emit(&serde_json::to_string_pretty(&points)?, None)
}

// ── grid ───────────────────────────────────────────────────────────────

fn run_grid(args: &CliPointsArgs, grid: CliGridArgs, out: Option<&Path>) -> CliResult<()> {
    let (_, t) = args.solve()?;
    let spec = GridSpec::from(grid);
    let samples: Vec<GridSample> = sample_grid(&spec)
        .into_iter()
        .map(|src| GridSample {
            src,
            dst: t.apply(src),
        })
        .collect();
    if samples.is_empty() {
        tracing::warn!(
            "grid (padding {}, size {}, step {}) yields no samples; step must be positive and the grid at most {} points",
            spec.padding,
            spec.size,
            spec.step,
            MAX_GRID_SAMPLES
        );
    } else {
        tracing::info!("Remapped {} grid samples", samples.len());
    }
    emit(&serde_json::to_string_pretty(&samples)?, out)
}
