//! SVG documents and raw path data for generated puzzles.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::Puzzle;
use crate::config::PuzzleConfig;
use crate::piece::PieceOrigin;
use crate::render::{Anchor, Layout, PathWriter, Shape, fmt_coord};
use crate::trace::{Arc, trace_piece};

/// Stroke of the preview document, in output units.
pub const PREVIEW_STROKE_WIDTH: f64 = 1.0;
/// Hairline stroke of the cutting document.
pub const CUT_STROKE_WIDTH: f64 = 0.1;

/// Closed path for one traced outline: `M start`, the drawn arcs, `Z`.
pub fn piece_path(arcs: &[Arc], layout: &Layout, shape: Shape) -> String {
    let Some(first) = arcs.first() else {
        return String::new();
    };
    let mut w = PathWriter::new(layout, shape);
    w.move_to(first.anchors().0);
    for arc in arcs {
        w.arc(arc);
    }
    w.close();
    w.finish()
}

/// Per-piece path strings, without any document around them.
pub fn path_data_list(puzzle: &Puzzle, layout: &Layout, shape: Shape) -> Vec<String> {
    puzzle
        .pieces()
        .iter()
        .map(|p| piece_path(&trace_piece(p), layout, shape))
        .collect()
}

fn svg_open(width: f64, height: f64, stroke_width: f64) -> String {
    let (w, h) = (fmt_coord(width), fmt_coord(height));
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" stroke=\"#333\" fill=\"none\" stroke-width=\"{}\" stroke-linejoin=\"round\">\n",
        fmt_coord(stroke_width)
    )
}

/// Preview document: one closed path per piece inside the framed area.
pub fn multi_path_svg(puzzle: &Puzzle, layout: &Layout, shape: Shape) -> String {
    let mut s = svg_open(
        layout.width(puzzle.ncols()),
        layout.height(puzzle.nrows()),
        PREVIEW_STROKE_WIDTH,
    );
    for (i, d) in path_data_list(puzzle, layout, shape).into_iter().enumerate() {
        s.push_str(&format!("<path id=\"piece-{i}\" d=\"{d}\"/>\n"));
    }
    s.push_str("</svg>\n");
    s
}

/// Every outline arc of the puzzle once, in piece order. A border shared by
/// two pieces keeps the copy from the piece traced first.
pub fn merged_arcs(puzzle: &Puzzle) -> Vec<Arc> {
    let mut seen = HashSet::new();
    puzzle
        .pieces()
        .iter()
        .flat_map(trace_piece)
        .filter(|arc| seen.insert(*arc))
        .collect()
}

/// Single path with shared borders cut once. The pen only lifts when the
/// next arc does not start where the previous one ended.
pub fn merged_path_data(puzzle: &Puzzle, layout: &Layout, shape: Shape) -> String {
    let mut w = PathWriter::new(layout, shape);
    let mut cursor: Option<Anchor> = None;
    for arc in merged_arcs(puzzle) {
        let (start, end) = arc.anchors();
        if cursor != Some(start) {
            w.move_to(start);
        }
        w.arc(&arc);
        cursor = Some(end);
    }
    w.finish()
}

/// Cutting document: no frame, hairline stroke, one path.
pub fn merged_path_svg(puzzle: &Puzzle, layout: &Layout, shape: Shape) -> String {
    let layout = layout.without_frame();
    let mut s = svg_open(
        layout.width(puzzle.ncols()),
        layout.height(puzzle.nrows()),
        CUT_STROKE_WIDTH,
    );
    s.push_str(&format!(
        "<path d=\"{}\"/>\n",
        merged_path_data(puzzle, &layout, shape)
    ));
    s.push_str("</svg>\n");
    s
}

/// All outputs of one run, as handed to the surrounding application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    pub piece_count: usize,
    pub tile_counts: Vec<usize>,
    /// Parallel to `tile_counts`; `patch` marks pieces gathered from boxed-in
    /// tiles, which may be smaller than the configured minimum.
    pub origins: Vec<PieceOrigin>,
    pub document: String,
    pub merged_document: String,
    pub paths: Vec<String>,
}

impl Rendered {
    pub fn new(puzzle: &Puzzle, config: &PuzzleConfig) -> Self {
        let layout = config.layout();
        Rendered {
            piece_count: puzzle.piece_count(),
            tile_counts: puzzle.pieces().iter().map(|p| p.tile_count()).collect(),
            origins: puzzle.pieces().iter().map(|p| p.origin()).collect(),
            document: multi_path_svg(puzzle, &layout, config.shape),
            merged_document: merged_path_svg(puzzle, &layout, config.shape),
            paths: path_data_list(puzzle, &layout, config.shape),
        }
    }
}
