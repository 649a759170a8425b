//! Arc to path-fragment rendering.
//!
//! Every arc starts and ends on an anchor: an integer lattice point in units
//! of the tile radius. Tile `(x, y)` is centred on anchor `(2x + 1, 2y + 1)`,
//! and its four axis points sit one unit away. Working on integers keeps
//! shared corners bit-identical no matter which tile they are derived from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grid::{Quadrant, Tile};
use crate::trace::Arc;

/// `tan(22.5 deg)`: half the side of a unit-inradius octagon.
pub const TAN_22_5: f64 = 0.41421356237309515;

/// Unit offsets from a tile centre to its axis points. Quadrant `q` spans
/// `AXES[q]` to `AXES[q + 1]`.
const AXES: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Corner style of the cut contour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Circle,
    Square,
    Octagon,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Octagon => "octagon",
        })
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Shape::Circle),
            "square" => Ok(Shape::Square),
            "octagon" => Ok(Shape::Octagon),
            other => Err(format!(
                "unknown shape '{other}', expected circle, square or octagon"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub fn center_of(tile: Tile) -> Self {
        Anchor {
            x: 2 * tile.x + 1,
            y: 2 * tile.y + 1,
        }
    }
}

/// The two axis points bounding quadrant `q` of `tile`, in counter-clockwise
/// order.
pub fn corner_anchors(tile: Tile, q: Quadrant) -> (Anchor, Anchor) {
    let c = Anchor::center_of(tile);
    let (lx, ly) = AXES[q.index()];
    let (hx, hy) = AXES[q.turn(1).index()];
    (
        Anchor {
            x: c.x + lx,
            y: c.y + ly,
        },
        Anchor {
            x: c.x + hx,
            y: c.y + hy,
        },
    )
}

/// Maps anchors to output coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub radius: f64,
    pub frame: f64,
}

impl Layout {
    pub fn point(&self, a: Anchor) -> Point {
        Point {
            x: self.frame + self.radius * a.x as f64,
            y: self.frame + self.radius * a.y as f64,
        }
    }

    pub fn center(&self, tile: Tile) -> Point {
        self.point(Anchor::center_of(tile))
    }

    pub fn width(&self, ncols: u32) -> f64 {
        ncols as f64 * 2.0 * self.radius + 2.0 * self.frame
    }

    pub fn height(&self, nrows: u32) -> f64 {
        nrows as f64 * 2.0 * self.radius + 2.0 * self.frame
    }

    pub fn without_frame(self) -> Layout {
        Layout {
            frame: 0.0,
            ..self
        }
    }
}

/// Shortest text that reads back as the same `f64`. Integral values print
/// without a fractional part.
pub fn fmt_coord(v: f64) -> String {
    // Keep `-0` out of the output.
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v}")
}

fn fmt_point(p: Point) -> String {
    format!("{} {}", fmt_coord(p.x), fmt_coord(p.y))
}

/// Octagon vertices cut by `arc`: the end of the start anchor's side, then
/// the start of the end anchor's side. Consecutive arcs meet on a shared
/// side, so the pen runs straight through the anchor between them.
fn chamfer(arc: &Arc, layout: &Layout) -> (Point, Point) {
    let (start, end) = arc.anchors();
    let c = Anchor::center_of(arc.tile);
    let t = layout.radius * TAN_22_5;
    let (sp, ep) = (layout.point(start), layout.point(end));
    (
        Point {
            x: sp.x + t * (end.x - c.x) as f64,
            y: sp.y + t * (end.y - c.y) as f64,
        },
        Point {
            x: ep.x + t * (start.x - c.x) as f64,
            y: ep.y + t * (start.y - c.y) as f64,
        },
    )
}

/// Builds SVG path data from anchors and arcs.
///
/// Line segments that would not move the pen are dropped, which happens on
/// octagon outlines wherever two concave arcs meet at a tab.
pub struct PathWriter<'a> {
    layout: &'a Layout,
    shape: Shape,
    d: String,
    pen: Option<Point>,
}

impl<'a> PathWriter<'a> {
    pub fn new(layout: &'a Layout, shape: Shape) -> Self {
        PathWriter {
            layout,
            shape,
            d: String::new(),
            pen: None,
        }
    }

    pub fn move_to(&mut self, a: Anchor) {
        let p = self.layout.point(a);
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        self.d.push_str("M ");
        self.d.push_str(&fmt_point(p));
        self.pen = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        if self.pen == Some(p) {
            return;
        }
        self.d.push_str(" L ");
        self.d.push_str(&fmt_point(p));
        self.pen = Some(p);
    }

    /// Draws `arc`, assuming the pen sits on its start anchor (or, for
    /// octagons, on the side through it).
    pub fn arc(&mut self, arc: &Arc) {
        match self.shape {
            Shape::Circle => {
                let end = self.layout.point(arc.anchors().1);
                let r = fmt_coord(self.layout.radius);
                self.d.push_str(&format!(
                    " A {r} {r} 0 0 {} {}",
                    arc.bend.sweep_flag(),
                    fmt_point(end)
                ));
                self.pen = Some(end);
            }
            Shape::Square => self.line_to(self.layout.point(arc.anchors().1)),
            Shape::Octagon => {
                let (a, b) = chamfer(arc, self.layout);
                self.line_to(a);
                self.line_to(b);
            }
        }
    }

    pub fn close(&mut self) {
        self.d.push_str(" Z");
        self.pen = None;
    }

    pub fn finish(self) -> String {
        self.d
    }
}
