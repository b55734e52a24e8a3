//! # Moon Phase Engine
//!
//! One engine serves every front-end. A presentation variant picks what it
//! needs through [`Capabilities`] instead of carrying its own copy of the
//! geometry: the simple variant shows only the Earth view and phase name, the
//! full variant adds eclipse detection and the tilted side view.
//!
//! The engine holds only immutable parameters. Every call is a pure function
//! of the angle it is given, so results can be memoized per angle and stale
//! results simply discarded.

use crate::angle::{self, normalize};
use crate::eclipse::{EclipseCondition, EclipseGeometry, EclipseTolerances};
use crate::lunar::{classify_phase, illuminated_fraction, PhaseName};
use crate::side_view::OrbitModel;
use crate::terminator::moon_outline;
use crate::{MoonState, PhasePreview, SideViewState};
use serde::{Deserialize, Serialize};

/// Optional features a front-end can ask the engine for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub include_side_view: bool,
    pub include_eclipses: bool,
}

impl Capabilities {
    /// Earth view and phase name only.
    pub const SIMPLE: Capabilities = Capabilities {
        include_side_view: false,
        include_eclipses: false,
    };

    /// Everything: eclipses and the side view.
    pub const FULL: Capabilities = Capabilities {
        include_side_view: true,
        include_eclipses: true,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::FULL
    }
}

/// Parameters plus capability flags; cheap to copy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoonPhaseEngine {
    pub orbit: OrbitModel,
    pub tolerances: EclipseTolerances,
    pub capabilities: Capabilities,
}

impl MoonPhaseEngine {
    pub fn new(orbit: OrbitModel, tolerances: EclipseTolerances, capabilities: Capabilities) -> Self {
        Self {
            orbit,
            tolerances,
            capabilities,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn phase(&self, orbit_angle_deg: f64) -> PhaseName {
        classify_phase(angle::phase_angle(orbit_angle_deg))
    }

    /// Always [`EclipseCondition::None`] when eclipses are disabled.
    pub fn eclipse(&self, orbit_angle_deg: f64) -> EclipseCondition {
        if !self.capabilities.include_eclipses {
            return EclipseCondition::None;
        }
        EclipseGeometry::at(orbit_angle_deg, self.orbit.node_longitude_deg).classify(&self.tolerances)
    }

    /// Everything a front-end draws for one orbital angle.
    ///
    /// The Earth-view outline is centered on the origin with `moon_radius`.
    /// Side-view coordinates are relative to Earth at the origin for an
    /// orbit of `orbit_radius`.
    ///
    /// # Panics
    /// If either radius is not positive.
    ///
    /// # Example
    /// ```
    /// use moon_phase_lib::engine::MoonPhaseEngine;
    /// use moon_phase_lib::eclipse::EclipseCondition;
    /// use moon_phase_lib::lunar::PhaseName;
    ///
    /// let state = MoonPhaseEngine::default().snapshot(80.0, 30.0, 100.0);
    /// assert_eq!(state.phase, PhaseName::FullMoon);
    /// assert_eq!(state.eclipse, EclipseCondition::Lunar);
    /// assert!(state.side_view.is_some());
    /// ```
    pub fn snapshot(&self, orbit_angle_deg: f64, moon_radius: f64, orbit_radius: f64) -> MoonState {
        let orbit_angle_deg = normalize(orbit_angle_deg);
        let phase_angle_deg = angle::phase_angle(orbit_angle_deg);

        let side_view = self
            .capabilities
            .include_side_view
            .then(|| self.side_view(orbit_angle_deg, orbit_radius));

        MoonState {
            orbit_angle_deg,
            phase_angle_deg,
            phase: classify_phase(phase_angle_deg),
            illuminated_fraction: illuminated_fraction(phase_angle_deg),
            eclipse: self.eclipse(orbit_angle_deg),
            outline: moon_outline(phase_angle_deg, moon_radius),
            side_view,
        }
    }

    /// Side-view geometry relative to Earth at the origin.
    pub fn side_view(&self, orbit_angle_deg: f64, orbit_radius: f64) -> SideViewState {
        SideViewState {
            elevation: self.orbit.projected_elevation(orbit_angle_deg, orbit_radius),
            moon: self.orbit.side_position(0.0, 0.0, orbit_radius, orbit_angle_deg),
            orbit_path: self.orbit.tilted_orbit_path(0.0, 0.0, orbit_radius),
            nodes: self.orbit.node_positions(0.0, 0.0, orbit_radius),
        }
    }

    /// The eight reference phases with the one matching `orbit_angle_deg`
    /// marked active.
    pub fn phase_strip(&self, orbit_angle_deg: f64, radius: f64) -> Vec<PhasePreview> {
        let current = self.phase(orbit_angle_deg);
        PhaseName::ALL
            .iter()
            .map(|&phase| PhasePreview {
                phase,
                phase_angle_deg: phase.center_angle(),
                outline: moon_outline(phase.center_angle(), radius),
                active: phase == current,
            })
            .collect()
    }
}
