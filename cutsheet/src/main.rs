use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use jigsaw_core::{
    PieceOrigin, PuzzleConfig, RECOMMENDED_MAX_DIMENSION, Rendered, Shape, generate,
};
use log::{info, warn};
use serde::Serialize;

mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "cutsheet",
    version,
    about = "Generate jigsaw piece outlines as SVG cut sheets"
)]
struct Cli {
    /// Base configuration (JSON); flags below override its fields
    #[arg(long, env = "CUTSHEET_CONFIG")]
    config: Option<PathBuf>,
    /// Tiles per row
    #[arg(long)]
    cols: Option<u32>,
    /// Tiles per column
    #[arg(long)]
    rows: Option<u32>,
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,
    /// Minimum tiles per piece
    #[arg(long)]
    min: Option<u32>,
    /// Maximum tiles per piece
    #[arg(long)]
    max: Option<u32>,
    #[arg(long)]
    radius: Option<f64>,
    #[arg(long)]
    frame: Option<f64>,
    /// circle, square or octagon
    #[arg(long)]
    shape: Option<Shape>,
    #[arg(long)]
    fill_passes: Option<u32>,
    /// Preview document, one path per piece (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Single-path cutting document
    #[arg(long)]
    cut: Option<PathBuf>,
    /// JSON array of per-piece path data
    #[arg(long)]
    paths: Option<PathBuf>,
    /// Print a JSON summary to stderr
    #[arg(long)]
    summary: bool,
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    ncols: u32,
    nrows: u32,
    seed: i64,
    shape: Shape,
    piece_count: usize,
    tile_counts: &'a [usize],
    origins: &'a [PieceOrigin],
}

fn resolve_config(cli: &Cli) -> Result<PuzzleConfig, Box<dyn Error>> {
    let mut cfg = match &cli.config {
        Some(path) => PuzzleConfig::from_json(&fs::read_to_string(path)?)?,
        None => PuzzleConfig::default(),
    };
    if let Some(v) = cli.cols {
        cfg.ncols = v;
    }
    if let Some(v) = cli.rows {
        cfg.nrows = v;
    }
    if let Some(v) = cli.seed {
        cfg.seed = v;
    }
    if let Some(v) = cli.min {
        cfg.min_piece_len = v;
    }
    if let Some(v) = cli.max {
        cfg.max_piece_len = v;
    }
    if let Some(v) = cli.radius {
        cfg.radius = v;
    }
    if let Some(v) = cli.frame {
        cfg.frame = v;
    }
    if let Some(v) = cli.shape {
        cfg.shape = v;
    }
    if let Some(v) = cli.fill_passes {
        cfg.fill_passes = v;
    }
    Ok(cfg)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let config = resolve_config(&cli)?;
    if config.ncols > RECOMMENDED_MAX_DIMENSION || config.nrows > RECOMMENDED_MAX_DIMENSION {
        warn!(
            "{}x{} grid exceeds the recommended {} tiles per side",
            config.ncols, config.nrows, RECOMMENDED_MAX_DIMENSION
        );
    }
    let puzzle = generate(&config)?;
    let out = Rendered::new(&puzzle, &config);

    match &cli.out {
        Some(path) => {
            fs::write(path, &out.document)?;
            info!("wrote preview {}", path.display());
        }
        None => io::stdout().write_all(out.document.as_bytes())?,
    }
    if let Some(path) = &cli.cut {
        fs::write(path, &out.merged_document)?;
        info!("wrote cut sheet {}", path.display());
    }
    if let Some(path) = &cli.paths {
        fs::write(path, serde_json::to_string_pretty(&out.paths)?)?;
        info!("wrote {} piece paths to {}", out.paths.len(), path.display());
    }
    if cli.summary {
        let summary = Summary {
            ncols: config.ncols,
            nrows: config.nrows,
            seed: config.seed,
            shape: config.shape,
            piece_count: out.piece_count,
            tile_counts: &out.tile_counts,
            origins: &out.origins,
        };
        eprintln!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}
