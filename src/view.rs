//! Interaction state owned by a front-end: the current orbital angle and the
//! top/side view toggle, plus the drag-gesture mapping that feeds the angle.

use crate::angle::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which diagram the front-end shows above the Earth view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Orbit seen from above the ecliptic pole
    #[default]
    Top,
    /// Orbit seen edge-on along the ecliptic
    Side,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Top => ViewMode::Side,
            ViewMode::Side => ViewMode::Top,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Top => "Top View",
            ViewMode::Side => "Side View",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Orbital angle for a pointer at `(dx, dy)` from the orbit center, in
/// screen coordinates (y down). Straight up is 0°, right is 90°.
///
/// Returns `None` when the pointer sits exactly on the center.
///
/// # Example
/// ```
/// use moon_phase_lib::view::drag_angle;
///
/// assert_eq!(drag_angle(0.0, -10.0), Some(0.0));
/// assert_eq!(drag_angle(10.0, 0.0), Some(90.0));
/// assert_eq!(drag_angle(-10.0, 0.0), Some(270.0));
/// ```
pub fn drag_angle(dx: f64, dy: f64) -> Option<f64> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(normalize(dx.atan2(-dy).to_degrees()))
}

/// Angle and view mode of one front-end session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    orbit_angle_deg: f64,
    view_mode: ViewMode,
}

impl Default for InteractionState {
    /// Starts in a waxing gibbous position in the top view.
    fn default() -> Self {
        Self {
            orbit_angle_deg: 45.0,
            view_mode: ViewMode::Top,
        }
    }
}

impl InteractionState {
    pub fn new(orbit_angle_deg: f64, view_mode: ViewMode) -> Self {
        Self {
            orbit_angle_deg: normalize(orbit_angle_deg),
            view_mode,
        }
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle_deg
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_angle(&mut self, orbit_angle_deg: f64) {
        self.orbit_angle_deg = normalize(orbit_angle_deg);
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn toggle_view(&mut self) {
        self.view_mode = self.view_mode.toggled();
    }

    /// Pointer moved to `(dx, dy)` from the orbit center. A pointer on the
    /// center leaves the angle unchanged. Returns whether the angle changed.
    pub fn drag_to(&mut self, dx: f64, dy: f64) -> bool {
        match drag_angle(dx, dy) {
            Some(a) if a != self.orbit_angle_deg => {
                self.orbit_angle_deg = a;
                true
            }
            _ => false,
        }
    }
}
