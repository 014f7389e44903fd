//! Tracking CLI
//!
//! Tracking JSON → normalized CSV table
//! Team shape series, file discovery, CSV inspection, pitch rendering

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use track_core::{IngestConfig, Orientation, PitchType, ToolConfig};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "track_cli")]
#[command(about = "Normalize football tracking data and draw pitches", long_about = None)]
struct Cli {
    /// YAML config file (ingest + pitch sections)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum CsvKind {
    Tracking,
    Events,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Normalize a tracking document (match directory or JSON file)
    Normalize {
        path: PathBuf,

        /// Write the normalized table as CSV
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write the merged metadata as JSON
        #[arg(long)]
        meta_out: Option<PathBuf>,

        /// Fallback frame rate when the metadata has none
        #[arg(long)]
        frame_rate: Option<f64>,
    },

    /// List files under a directory matching a pattern
    List {
        root: PathBuf,

        #[arg(long, default_value = track_core::ingest::discovery::DEFAULT_PATTERN)]
        pattern: String,
    },

    /// Inspect a generic-provider CSV export
    Csv {
        path: PathBuf,

        #[arg(long, value_enum, default_value = "tracking")]
        kind: CsvKind,
    },

    /// Per-frame team centroid, length and width
    Shape {
        path: PathBuf,

        /// Team identifier as it appears in the tracking data
        #[arg(long)]
        team: String,

        /// Write the series as CSV instead of printing a summary
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Draw a pitch, optionally with one frame of positions
    Pitch {
        /// Output image (.png, .jpg, .bmp, .svg)
        #[arg(long)]
        out: PathBuf,

        #[arg(long)]
        orientation: Option<Orientation>,

        #[arg(long)]
        pitch_type: Option<PitchType>,

        /// Physical length in metres (needs --width)
        #[arg(long, requires = "width")]
        length: Option<f64>,

        /// Physical width in metres (needs --length)
        #[arg(long, requires = "length")]
        width: Option<f64>,

        #[arg(long)]
        dpi: Option<u32>,

        #[arg(long)]
        title: Option<String>,

        /// Tracking document to overlay
        #[arg(long, requires = "frame")]
        tracking: Option<PathBuf>,

        /// Frame index to overlay
        #[arg(long, requires = "tracking")]
        frame: Option<i64>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => ToolConfig::load(path)?,
        None => ToolConfig::default(),
    };

    match cli.command {
        Commands::Normalize {
            path,
            out,
            meta_out,
            frame_rate,
        } => {
            let ingest = match frame_rate {
                Some(fps) => config.ingest.with_frame_rate(fps),
                None => config.ingest,
            };
            normalize(&path, &ingest, out.as_deref(), meta_out.as_deref())?;
        }

        Commands::List { root, pattern } => {
            for file in track_core::list_files(&root, &pattern)? {
                println!("{}", file.display());
            }
        }

        Commands::Csv { path, kind } => {
            let table = match kind {
                CsvKind::Tracking => track_core::load_tracking_csv(&path)?,
                CsvKind::Events => track_core::load_events_csv(&path)?,
            };
            println!("{}", path.display());
            println!("   Columns: {}", table.headers().join(", "));
            println!("   Rows:    {}", table.len());
        }

        Commands::Shape { path, team, out } => {
            shape(&path, &team, &config.ingest, out.as_deref())?;
        }

        Commands::Pitch {
            out,
            orientation,
            pitch_type,
            length,
            width,
            dpi,
            title,
            tracking,
            frame,
        } => {
            let mut pitch_cfg = config.pitch.clone();
            if let Some(o) = orientation {
                pitch_cfg.orientation = o;
            }
            if let Some(t) = pitch_type {
                pitch_cfg.pitch_type = t;
            }
            if let (Some(l), Some(w)) = (length, width) {
                pitch_cfg.pitch_length = Some(l);
                pitch_cfg.pitch_width = Some(w);
            }
            if let Some(d) = dpi {
                pitch_cfg.dpi = d;
            }
            let overlay = tracking.as_deref().zip(frame);
            draw_pitch(pitch_cfg, title.as_deref(), overlay, &config.ingest, &out)?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn normalize(
    path: &Path,
    ingest: &IngestConfig,
    out: Option<&Path>,
    meta_out: Option<&Path>,
) -> Result<()> {
    let (table, meta, stats) = track_core::load_tracking_with_stats(path, ingest)
        .with_context(|| format!("Failed to load tracking data: {}", path.display()))?;

    println!("{}", path.display());
    println!("   Frames:   {} ({} skipped)", stats.frames_seen, stats.frames_skipped);
    println!("   Entities: {}", stats.entities_seen);
    println!("   Rows:     {} ({} without coordinates dropped)", table.len(), stats.rows_dropped);
    println!("   Untimed frames: {}", stats.frames_without_time);
    println!("   Metadata keys:  {}", meta.len());

    if let Some(out) = out {
        table
            .write_csv(out)
            .with_context(|| format!("Failed to write table: {}", out.display()))?;
        println!("   Table written to: {}", out.display());
    }
    if let Some(meta_out) = meta_out {
        let text = serde_json::to_string_pretty(&meta)?;
        std::fs::write(meta_out, text)
            .with_context(|| format!("Failed to write metadata: {}", meta_out.display()))?;
        println!("   Metadata written to: {}", meta_out.display());
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn shape(path: &Path, team: &str, ingest: &IngestConfig, out: Option<&Path>) -> Result<()> {
    let (table, _) = track_core::load_tracking(path, ingest)
        .with_context(|| format!("Failed to load tracking data: {}", path.display()))?;
    let series = track_core::shape_series(&table, team);
    if series.is_empty() {
        anyhow::bail!("no rows for team {team:?} in {}", path.display());
    }

    match out {
        Some(out) => {
            let mut writer = csv::Writer::from_path(out)
                .with_context(|| format!("Failed to create {}", out.display()))?;
            writer.write_record([
                "period", "frame", "timestamp", "centroid_x", "centroid_y", "length", "width",
                "players",
            ])?;
            for s in &series {
                writer.write_record([
                    opt_cell(s.period),
                    opt_cell(s.frame),
                    opt_cell(s.timestamp),
                    s.shape.centroid.0.to_string(),
                    s.shape.centroid.1.to_string(),
                    s.shape.length.to_string(),
                    s.shape.width.to_string(),
                    s.shape.players.to_string(),
                ])?;
            }
            writer.flush()?;
            println!("{} frames written to {}", series.len(), out.display());
        }
        None => {
            let n = series.len() as f64;
            let mean = |f: fn(&track_core::ShapeSample) -> f64| {
                series.iter().map(f).sum::<f64>() / n
            };
            println!("Team {team}: {} frames", series.len());
            println!("   Mean length: {:.2}", mean(|s| s.shape.length));
            println!("   Mean width:  {:.2}", mean(|s| s.shape.width));
            println!(
                "   Mean centroid: ({:.2}, {:.2})",
                mean(|s| s.shape.centroid.0),
                mean(|s| s.shape.centroid.1)
            );
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Team colours cycled in first-seen order.
#[cfg(feature = "cli")]
const TEAM_COLORS: [&str; 4] = ["#d62728", "#1f77b4", "#2ca02c", "#ff7f0e"];

#[cfg(feature = "cli")]
fn draw_pitch(
    config: track_core::PitchConfig,
    title: Option<&str>,
    overlay: Option<(&Path, i64)>,
    ingest: &IngestConfig,
    out: &Path,
) -> Result<()> {
    let pitch = track_core::Pitch::new(config).context("Invalid pitch configuration")?;
    let mut fig = pitch.draw();
    if let Some(title) = title {
        fig.add_title(title, 16.0);
    }

    if let Some((tracking, frame)) = overlay {
        let (table, _) = track_core::load_tracking(tracking, ingest)
            .with_context(|| format!("Failed to load tracking data: {}", tracking.display()))?;
        let slice = table
            .frame(frame)
            .with_context(|| format!("Frame {frame} not found in {}", tracking.display()))?;

        let mut teams: Vec<Option<&str>> = Vec::new();
        for row in slice.rows {
            let team = row.team_id.as_deref();
            if !teams.contains(&team) {
                teams.push(team);
            }
        }
        for (i, team) in teams.iter().enumerate() {
            let points: Vec<(f64, f64)> = slice
                .rows
                .iter()
                .filter(|r| r.team_id.as_deref() == *team)
                .map(|r| (r.x, r.y))
                .collect();
            fig.scatter(&points, TEAM_COLORS[i % TEAM_COLORS.len()])?;
        }
    }

    fig.save(out)
        .with_context(|| format!("Failed to save pitch: {}", out.display()))?;
    println!("Pitch saved to: {}", out.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("track_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
