//! # Structured 2D Paths
//!
//! Geometry leaves the engine as a list of path segments instead of a markup
//! string. A rendering adapter turns it into whatever its target wants: SVG
//! path data via [`ShapePath::to_svg`], polylines via [`ShapePath::flatten`],
//! or pixel coverage via [`ShapePath::contains`].
//!
//! Coordinates follow screen conventions: `x` grows to the right and `y`
//! grows downward. Arcs use the SVG elliptical-arc endpoint
//! parameterization, so a sweep flag of `true` turns clockwise on screen.

use core::f64::consts::TAU;
use serde::{Deserialize, Serialize};

/// Angular step used when flattening arcs into line segments.
pub const ARC_FLATTEN_STEP_DEG: f64 = 5.0;

/// A point in path coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// One drawing command of a [`ShapePath`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathSegment {
    /// Start a new subpath.
    MoveTo(PathPoint),
    /// Straight line from the current point.
    LineTo(PathPoint),
    /// Elliptical arc from the current point to `to`.
    ///
    /// A zero radius degenerates to a straight line, as in SVG.
    ArcTo {
        rx: f64,
        ry: f64,
        x_rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        to: PathPoint,
    },
    /// Close the current subpath back to its start.
    Close,
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn around(p: PathPoint) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    fn include(&mut self, p: PathPoint) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// An ordered list of path segments, built with the `move_to` / `line_to` /
/// `arc_to` / `close` builder methods.
///
/// # Example
/// ```
/// use moon_phase_lib::path::{PathPoint, ShapePath};
///
/// let path = ShapePath::new()
///     .move_to(PathPoint::new(0.0, -10.0))
///     .arc_to(10.0, 10.0, true, PathPoint::new(0.0, 10.0))
///     .close();
///
/// assert!(path.is_closed());
/// assert_eq!(path.to_svg(), "M 0 -10 A 10 10 0 0 1 0 10 Z");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapePath {
    segments: Vec<PathSegment>,
}

impl ShapePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    pub fn move_to(mut self, p: PathPoint) -> Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: PathPoint) -> Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    /// Unrotated small-arc elliptical arc, the only kind the engine emits.
    pub fn arc_to(mut self, rx: f64, ry: f64, sweep: bool, to: PathPoint) -> Self {
        self.segments.push(PathSegment::ArcTo {
            rx,
            ry,
            x_rotation_deg: 0.0,
            large_arc: false,
            sweep,
            to,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// First point of the path.
    pub fn start_point(&self) -> Option<PathPoint> {
        match self.segments.first() {
            Some(PathSegment::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    /// Last explicit endpoint, ignoring a trailing `Close`.
    pub fn end_point(&self) -> Option<PathPoint> {
        self.segments.iter().rev().find_map(|segment| match segment {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(*p),
            PathSegment::ArcTo { to, .. } => Some(*to),
            PathSegment::Close => None,
        })
    }

    /// A single subpath that starts with `MoveTo` and ends with `Close`.
    pub fn is_closed(&self) -> bool {
        let moves = self
            .segments
            .iter()
            .filter(|s| matches!(s, PathSegment::MoveTo(_)))
            .count();
        moves == 1
            && self.start_point().is_some()
            && matches!(self.segments.last(), Some(PathSegment::Close))
    }

    /// Copy of the path shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let segments = self
            .segments
            .iter()
            .map(|segment| match *segment {
                PathSegment::MoveTo(p) => PathSegment::MoveTo(p.offset(dx, dy)),
                PathSegment::LineTo(p) => PathSegment::LineTo(p.offset(dx, dy)),
                PathSegment::ArcTo {
                    rx,
                    ry,
                    x_rotation_deg,
                    large_arc,
                    sweep,
                    to,
                } => PathSegment::ArcTo {
                    rx,
                    ry,
                    x_rotation_deg,
                    large_arc,
                    sweep,
                    to: to.offset(dx, dy),
                },
                PathSegment::Close => PathSegment::Close,
            })
            .collect();
        Self { segments }
    }

    /// Serialize as SVG path data (`M`, `L`, `A`, `Z` commands).
    pub fn to_svg(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match *segment {
                PathSegment::MoveTo(p) => format!("M {} {}", num(p.x), num(p.y)),
                PathSegment::LineTo(p) => format!("L {} {}", num(p.x), num(p.y)),
                PathSegment::ArcTo {
                    rx,
                    ry,
                    x_rotation_deg,
                    large_arc,
                    sweep,
                    to,
                } => format!(
                    "A {} {} {} {} {} {} {}",
                    num(rx),
                    num(ry),
                    num(x_rotation_deg),
                    u8::from(large_arc),
                    u8::from(sweep),
                    num(to.x),
                    num(to.y)
                ),
                PathSegment::Close => "Z".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Approximate the path with polylines, one per subpath.
    ///
    /// Arcs are sampled every [`ARC_FLATTEN_STEP_DEG`]. Closed subpaths end
    /// with a copy of their first point.
    pub fn flatten(&self) -> Vec<Vec<PathPoint>> {
        let mut subpaths: Vec<Vec<PathPoint>> = Vec::new();
        let mut current: Vec<PathPoint> = Vec::new();

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    if current.len() > 1 {
                        subpaths.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                PathSegment::LineTo(p) => current.push(p),
                PathSegment::ArcTo {
                    rx,
                    ry,
                    x_rotation_deg,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let from = current.last().copied().unwrap_or_default();
                    current.extend(flatten_arc(
                        from,
                        rx,
                        ry,
                        x_rotation_deg,
                        large_arc,
                        sweep,
                        to,
                    ));
                }
                PathSegment::Close => {
                    if let Some(&first) = current.first() {
                        if current.last() != Some(&first) {
                            current.push(first);
                        }
                    }
                    if current.len() > 1 {
                        subpaths.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
            }
        }

        if current.len() > 1 {
            subpaths.push(current);
        }
        subpaths
    }

    /// Bounding box of the flattened path, `None` for an empty path.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.flatten().into_iter().flatten();
        let mut bounds = Bounds::around(points.next()?);
        for p in points {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Even-odd fill test against the flattened path.
    pub fn contains(&self, p: PathPoint) -> bool {
        even_odd_contains(&self.flatten(), p)
    }

    /// Shoelace area of the flattened path (absolute, summed over subpaths).
    pub fn area(&self) -> f64 {
        self.flatten()
            .iter()
            .map(|polygon| {
                polygon
                    .windows(2)
                    .map(|e| e[0].x * e[1].y - e[1].x * e[0].y)
                    .sum::<f64>()
                    .abs()
                    / 2.0
            })
            .sum()
    }
}

/// Even-odd fill test against already flattened rings.
///
/// Renderers that test many pixels flatten once with [`ShapePath::flatten`]
/// and call this per pixel.
pub fn even_odd_contains(rings: &[Vec<PathPoint>], p: PathPoint) -> bool {
    let mut inside = false;
    for ring in rings {
        for edge in ring.windows(2) {
            let (a, b) = (edge[0], edge[1]);
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
    }
    inside
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Sample an SVG endpoint-parameterized arc, excluding `from`.
///
/// Converts to center parameterization (SVG 1.1 implementation notes F.6.5),
/// scaling the radii up when they are too small to span the endpoints.
fn flatten_arc(
    from: PathPoint,
    rx: f64,
    ry: f64,
    x_rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    to: PathPoint,
) -> Vec<PathPoint> {
    if from == to {
        return Vec::new();
    }
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx == 0.0 || ry == 0.0 {
        return vec![to];
    }

    let phi = x_rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let num = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
    let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = sign * (num / den).max(0.0).sqrt();
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let u = ((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = ((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let theta1 = vector_angle((1.0, 0.0), u);
    let mut dtheta = vector_angle(u, v);
    if !sweep && dtheta > 0.0 {
        dtheta -= TAU;
    } else if sweep && dtheta < 0.0 {
        dtheta += TAU;
    }

    let steps = (dtheta.abs() / ARC_FLATTEN_STEP_DEG.to_radians())
        .ceil()
        .max(1.0) as usize;
    let mut points = Vec::with_capacity(steps);
    for i in 1..steps {
        let t = theta1 + dtheta * i as f64 / steps as f64;
        let (sin_t, cos_t) = t.sin_cos();
        points.push(PathPoint::new(
            cx + rx * cos_phi * cos_t - ry * sin_phi * sin_t,
            cy + rx * sin_phi * cos_t + ry * cos_phi * sin_t,
        ));
    }
    points.push(to);
    points
}

/// Signed angle from `u` to `v`.
fn vector_angle(u: (f64, f64), v: (f64, f64)) -> f64 {
    let cross = u.0 * v.1 - u.1 * v.0;
    let dot = u.0 * v.0 + u.1 * v.1;
    cross.atan2(dot)
}
