//! # Eclipse Detection
//!
//! An eclipse needs two alignments at once:
//! - the Moon sits near one of its orbital nodes, so it is on the ecliptic
//!   and not just on the Sun–Earth line in projection;
//! - the Moon is near New (solar eclipse) or Full (lunar eclipse).
//!
//! Both tolerances are product tunables chosen to make eclipses easy to find
//! while dragging, not astronomical limits.

use crate::angle::{self, normalize};
use crate::side_view::NODE_LONGITUDE_DEG;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum distance from a node, in degrees, for an eclipse.
pub const NODE_TOLERANCE_DEG: f64 = 15.0;

/// Maximum distance from New or Full, in degrees of phase angle, for an eclipse.
pub const PHASE_TOLERANCE_DEG: f64 = 18.0;

/// Eclipse state for one orbital position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EclipseCondition {
    #[default]
    None,
    /// Moon between Sun and Earth on the ecliptic.
    Solar,
    /// Moon in Earth's shadow on the ecliptic.
    Lunar,
}

impl EclipseCondition {
    pub fn is_eclipse(self) -> bool {
        self != EclipseCondition::None
    }

    /// Short banner text, `None` when there is no eclipse.
    pub fn label(self) -> Option<&'static str> {
        match self {
            EclipseCondition::None => None,
            EclipseCondition::Solar => Some("Solar Eclipse"),
            EclipseCondition::Lunar => Some("Lunar Eclipse"),
        }
    }

    /// Description that replaces the phase explanation during an eclipse.
    pub fn explanation(self) -> Option<&'static str> {
        match self {
            EclipseCondition::None => None,
            EclipseCondition::Solar => Some(
                "The Moon is near the ecliptic plane and\nbetween the Sun and Earth: a solar eclipse!",
            ),
            EclipseCondition::Lunar => Some(
                "The Moon is near the ecliptic plane and\nbehind the Earth: a lunar eclipse!",
            ),
        }
    }
}

impl fmt::Display for EclipseCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("No Eclipse"))
    }
}

/// Tunable eclipse thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EclipseTolerances {
    /// Degrees of orbit from the nearest node
    pub node_tolerance_deg: f64,
    /// Degrees of phase angle from New or Full
    pub phase_tolerance_deg: f64,
}

impl Default for EclipseTolerances {
    fn default() -> Self {
        Self {
            node_tolerance_deg: NODE_TOLERANCE_DEG,
            phase_tolerance_deg: PHASE_TOLERANCE_DEG,
        }
    }
}

/// Angular distances that drive the eclipse decision.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EclipseGeometry {
    /// Distance from whichever node is closer, `[0, 90]`
    pub node_distance_deg: f64,
    /// Distance from New Moon in phase angle, `[0, 180]`
    pub new_moon_distance_deg: f64,
    /// Distance from Full Moon in phase angle, `[0, 180]`
    pub full_moon_distance_deg: f64,
}

impl EclipseGeometry {
    pub fn at(orbit_angle_deg: f64, node_longitude_deg: f64) -> Self {
        let phase = angle::phase_angle(orbit_angle_deg);
        let node_relative = normalize(orbit_angle_deg - node_longitude_deg);

        // Ascending node at 0°, descending at 180° in node-relative terms
        let from_ascending = node_relative.min(360.0 - node_relative);
        let from_descending = (node_relative - 180.0).abs();

        Self {
            node_distance_deg: from_ascending.min(from_descending),
            new_moon_distance_deg: phase.min(360.0 - phase),
            full_moon_distance_deg: (phase - 180.0).abs(),
        }
    }

    /// Solar is checked before Lunar.
    pub fn classify(&self, tolerances: &EclipseTolerances) -> EclipseCondition {
        let near_node = self.node_distance_deg < tolerances.node_tolerance_deg;
        if near_node && self.new_moon_distance_deg < tolerances.phase_tolerance_deg {
            EclipseCondition::Solar
        } else if near_node && self.full_moon_distance_deg < tolerances.phase_tolerance_deg {
            EclipseCondition::Lunar
        } else {
            EclipseCondition::None
        }
    }
}

/// Eclipse condition for an orbital angle with the default node and tolerances.
///
/// # Example
/// ```
/// use moon_phase_lib::eclipse::{detect_eclipse, EclipseCondition};
///
/// assert_eq!(detect_eclipse(80.0), EclipseCondition::Lunar);
/// assert_eq!(detect_eclipse(350.0), EclipseCondition::None);
/// ```
pub fn detect_eclipse(orbit_angle_deg: f64) -> EclipseCondition {
    detect_eclipse_with(
        orbit_angle_deg,
        NODE_LONGITUDE_DEG,
        &EclipseTolerances::default(),
    )
}

/// Eclipse condition for a custom node longitude and tolerances.
pub fn detect_eclipse_with(
    orbit_angle_deg: f64,
    node_longitude_deg: f64,
    tolerances: &EclipseTolerances,
) -> EclipseCondition {
    EclipseGeometry::at(orbit_angle_deg, node_longitude_deg).classify(tolerances)
}
