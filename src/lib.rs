//! # Moon Phases Core Library
//!
//! Orbital geometry and phase rendering for an interactive lunar phase and
//! eclipse visualization. A single continuous parameter, the Moon's orbital
//! angle in degrees, drives everything:
//!
//! - the named phase ([`lunar::classify_phase`])
//! - the lit fraction of the disk ([`lunar::illuminated_fraction`])
//! - the outline of the lit region as seen from Earth ([`terminator::moon_outline`])
//! - solar and lunar eclipse conditions ([`eclipse::detect_eclipse`])
//! - the tilted orbit seen edge-on ([`side_view`])
//!
//! ## Design Philosophy
//!
//! ### Pure Functions
//! Every engine function is a deterministic function of its inputs and a few
//! immutable constants. There is no shared state, no I/O and no clock, so a
//! front-end can call the engine on every drag event and memoize per angle.
//!
//! ### Angles
//! Inputs may be any real number of degrees. They are folded into `[0, 360)`
//! by [`angle::normalize`] before any bucket lookup or trigonometry. The phase
//! angle is the orbital angle plus 90°, because orbital angle 0° is the top
//! of the top-down diagram while the Sun sits to the left.
//!
//! ### Geometry Out, Markup Later
//! Outlines are returned as structured [`path::ShapePath`] values. The
//! [`renderer`] module turns them into ASCII art or embedded-graphics pixels,
//! and [`path::ShapePath::to_svg`] produces SVG path data.
//!
//! ## Core Types
//! - [`MoonState`]: everything drawn for one orbital angle
//! - [`SideViewState`]: the edge-on orbit geometry
//! - [`PhasePreview`]: one entry of the eight-phase strip

use serde::{Deserialize, Serialize};

pub mod angle;
pub mod config;
pub mod eclipse;
pub mod engine;
pub mod lunar;
pub mod path;
pub mod renderer;
pub mod side_view;
pub mod terminator;
pub mod view;

use eclipse::EclipseCondition;
use lunar::PhaseName;
use path::{PathPoint, ShapePath};

/// Snapshot of the engine's output for one orbital angle.
///
/// Recomputed on every angle change and never cached by the engine itself.
///
/// # Example
/// ```
/// use moon_phase_lib::engine::MoonPhaseEngine;
///
/// let state = MoonPhaseEngine::default().snapshot(0.0, 30.0, 100.0);
/// assert_eq!(state.phase.label(), "First Quarter");
/// assert!((state.illuminated_fraction - 0.5).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoonState {
    /// Orbital angle, normalized to [0, 360)
    pub orbit_angle_deg: f64,
    /// Orbital angle + 90°, normalized
    pub phase_angle_deg: f64,
    pub phase: PhaseName,
    /// 0 = dark disk, 1 = fully lit
    pub illuminated_fraction: f64,
    pub eclipse: EclipseCondition,
    /// Lit region of the Earth-view disk, centered on the origin
    pub outline: ShapePath,
    /// Present only when the side view capability is enabled
    pub side_view: Option<SideViewState>,
}

impl MoonState {
    /// Eclipse text during an eclipse, otherwise the phase text.
    pub fn explanation(&self) -> &'static str {
        self.eclipse
            .explanation()
            .unwrap_or_else(|| self.phase.explanation())
    }

    /// Illuminated fraction as a whole percentage.
    pub fn illuminated_percent(&self) -> u8 {
        (self.illuminated_fraction * 100.0).round() as u8
    }
}

/// Edge-on view of the tilted orbit, relative to Earth at the origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideViewState {
    /// Height above the ecliptic (positive = above)
    pub elevation: f64,
    /// Moon position in screen orientation (y down)
    pub moon: PathPoint,
    /// Sampled closed orbit path
    pub orbit_path: ShapePath,
    /// Ascending then descending node, both on the ecliptic
    pub nodes: [PathPoint; 2],
}

/// One small disk of the phase strip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhasePreview {
    pub phase: PhaseName,
    pub phase_angle_deg: f64,
    pub outline: ShapePath,
    /// True for the phase currently shown
    pub active: bool,
}
