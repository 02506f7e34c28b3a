//! rcsim CLI - target meshes and bounce histories from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Mesh statistics for the default cube
//! rcsim mesh
//!
//! # A coarse sphere, as JSON
//! rcsim --shape sphere --subdivisions 2 mesh --json
//!
//! # World-space crease edges of a configured target
//! rcsim --config sim.toml edges
//!
//! # Bounce history for tracer output
//! rcsim bounce --hits hits.bin --mode path
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rcsim::{
    read_hit_records, BounceState, GpuEdge, HitResult, RayTraceMode, ReflectionCluster, SimConfig,
    Target, TargetShape,
};
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "rcsim")]
#[command(author, version, about = "Radar cross-section target tooling", long_about = None)]
struct Cli {
    /// TOML simulation config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Target shape: cube, cylinder, aircraft, or sphere
    #[arg(long, global = true)]
    shape: Option<String>,

    /// Geodesic subdivision level for the sphere
    #[arg(long, global = true)]
    subdivisions: Option<i32>,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print vertex, triangle, edge, and crease counts
    Mesh {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the crease edges in world space as JSON
    Edges,
    /// Run tracer hits through the bounce pipeline
    Bounce {
        /// Hit records: a .json array or raw 64-byte .bin records
        #[arg(long)]
        hits: PathBuf,

        /// Override the configured trace mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModeArg {
    /// Count bounces only
    Path,
    /// Run every enabled effect
    Physics,
}

impl From<ModeArg> for RayTraceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Path => RayTraceMode::Path,
            ModeArg::Physics => RayTraceMode::PhysicsAccurate,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("rcsim v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Mesh { json } => {
            let target = config.build_target();
            target.geometry().validate()?;
            let stats = MeshStats::of(&target);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{stats}");
            }
        }
        Commands::Edges => {
            let edges: Vec<EdgeJson> = config
                .build_target()
                .diffraction_edges()
                .iter()
                .map(EdgeJson::from)
                .collect();
            println!("{}", serde_json::to_string_pretty(&edges)?);
        }
        Commands::Bounce { hits, mode } => {
            let hits = read_hit_records(&hits)
                .with_context(|| format!("Failed to read hits {}", hits.display()))?;
            let report = run_bounce(&config, &hits, mode);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Config file (or defaults) with the command-line overrides applied.
fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };

    if let Some(name) = &cli.shape {
        config.target.shape = TargetShape::from_name(name);
    }
    if let Some(level) = cli.subdivisions {
        config.target.subdivisions = level;
    }
    config.validate()?;

    debug!(?config, "resolved configuration");
    Ok(config)
}

#[derive(Serialize, Debug, PartialEq)]
struct MeshStats {
    shape: String,
    vertices: usize,
    triangles: usize,
    edges: usize,
    creases: usize,
}

impl MeshStats {
    fn of(target: &Target) -> Self {
        let geometry = target.geometry();
        Self {
            shape: target.shape().name().to_string(),
            vertices: geometry.mesh().num_vertices(),
            triangles: geometry.mesh().num_triangles(),
            edges: geometry.edges().len(),
            creases: geometry.crease_count(),
        }
    }
}

impl std::fmt::Display for MeshStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Shape: {}", self.shape)?;
        writeln!(f, "Vertices: {}", self.vertices)?;
        writeln!(f, "Triangles: {}", self.triangles)?;
        writeln!(f, "Edges: {}", self.edges)?;
        write!(f, "Creases: {}", self.creases)
    }
}

#[derive(Serialize, Debug)]
struct EdgeJson {
    start: [f32; 3],
    end: [f32; 3],
    crease_angle: f32,
    is_crease: bool,
}

impl From<&GpuEdge> for EdgeJson {
    fn from(edge: &GpuEdge) -> Self {
        let (start, end) = (edge.start(), edge.end());
        Self {
            start: [start.x, start.y, start.z],
            end: [end.x, end.y, end.z],
            crease_angle: edge.crease_angle(),
            is_crease: edge.is_crease(),
        }
    }
}

#[derive(Serialize, Debug)]
struct BounceReport {
    mode: RayTraceMode,
    history: Vec<BounceState>,
    cluster: Option<ReflectionCluster>,
}

fn run_bounce(config: &SimConfig, hits: &[HitResult], mode: Option<ModeArg>) -> BounceReport {
    let mut pipeline = config.build_pipeline();
    if let Some(mode) = mode {
        pipeline.set_mode(mode.into());
    }
    BounceReport {
        mode: pipeline.mode(),
        history: pipeline.trace_history(hits),
        cluster: ReflectionCluster::from_hits(hits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rcsim::math::{Point3, Vec3};

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rcsim", "mesh", "--json", "--shape", "sphere"]).unwrap();
        assert_eq!(cli.shape.as_deref(), Some("sphere"));
        assert!(matches!(cli.command, Commands::Mesh { json: true }));
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_cli_bounce_mode() {
        let cli =
            Cli::try_parse_from(["rcsim", "bounce", "--hits", "h.bin", "--mode", "path"]).unwrap();
        match cli.command {
            Commands::Bounce { hits, mode } => {
                assert_eq!(hits, PathBuf::from("h.bin"));
                assert_eq!(mode, Some(ModeArg::Path));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["rcsim", "bounce", "--hits", "h", "--mode", "fast"]).is_err());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("nonsense"), Level::INFO);
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from(["rcsim", "--shape", "sphere", "--subdivisions", "1", "mesh"])
            .unwrap();
        let config = load_config(&cli).unwrap();
        let stats = MeshStats::of(&config.build_target());
        assert_eq!(stats.shape, "sphere");
        assert_eq!(stats.vertices, 42);
        assert_eq!(stats.triangles, 80);
    }

    #[test]
    fn test_override_is_validated() {
        let cli = Cli::try_parse_from(["rcsim", "--subdivisions", "9", "mesh"]).unwrap();
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_cube_stats() {
        let stats = MeshStats::of(&Target::default());
        assert_eq!(stats.triangles, 12);
        assert_eq!(stats.creases, 12);
        assert!(stats.to_string().contains("Creases: 12"));
    }

    #[test]
    fn test_run_bounce() {
        let hits = vec![
            HitResult::new(Point3::new(0.5, 0.0, 0.0), 4.5, Vec3::x())
                .with_reflection(Vec3::x(), 1.0);
            2
        ];
        let config = SimConfig::default();

        let report = run_bounce(&config, &hits, None);
        assert_eq!(report.mode, RayTraceMode::PhysicsAccurate);
        assert_relative_eq!(report.history[1].intensity, 0.7225, epsilon = 1e-6);
        assert_eq!(report.cluster.unwrap().hit_count(), 2);

        let report = run_bounce(&config, &hits, Some(ModeArg::Path));
        assert_eq!(report.history[1].intensity, 1.0);
        assert_eq!(report.history[1].bounce_count, 2);
    }

    #[test]
    fn test_edge_json() {
        let mut config = SimConfig::default();
        config.target.position = [0.0, 0.0, 10.0];
        let edges: Vec<EdgeJson> = config
            .build_target()
            .diffraction_edges()
            .iter()
            .map(EdgeJson::from)
            .collect();
        assert_eq!(edges.len(), 12);
        assert!(edges.iter().all(|e| e.is_crease && e.start[2] >= 9.5 - 1e-5));

        let value = serde_json::to_value(&edges[0]).unwrap();
        assert!(value.get("crease_angle").is_some());
    }
}
