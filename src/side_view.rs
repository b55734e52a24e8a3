//! # Side-View Orbit Projection
//!
//! Looks at the Moon's orbit edge-on, with the ecliptic as a horizontal line
//! through Earth. The orbit is a circle tilted about the line of nodes, so
//! seen from the side:
//!
//! ```text
//! x         = cx + r · sin(θ)
//! elevation = r · sin(i) · k · sin(θ − Ω)
//! ```
//!
//! where `θ` is the orbital angle, `i` the inclination, `Ω` the ascending node
//! longitude and `k` a visual exaggeration (the true 5° tilt is invisible at
//! phone-screen scale). Screen `y` grows downward, so the Moon is drawn at
//! `cy − elevation`.

use crate::path::{PathPoint, ShapePath};
use serde::{Deserialize, Serialize};

/// Tilt of the Moon's orbital plane against the ecliptic.
pub const ORBIT_INCLINATION_DEG: f64 = 5.14;

/// Orbital angle of the ascending node; the descending node is 180° away.
pub const NODE_LONGITUDE_DEG: f64 = 80.0;

/// Vertical inflation applied to the tilt in the side view.
pub const SIDE_VIEW_EXAGGERATION: f64 = 6.0;

/// Angular spacing of the samples on the tilted orbit path.
pub const ORBIT_SAMPLE_STEP_DEG: f64 = 5.0;

/// Finest sample spacing accepted; bounds the path at 3600 points.
pub const MIN_SAMPLE_STEP_DEG: f64 = 0.1;

/// Static parameters of the tilted orbit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitModel {
    pub node_longitude_deg: f64,
    pub inclination_deg: f64,
    pub exaggeration: f64,
    pub sample_step_deg: f64,
}

impl Default for OrbitModel {
    fn default() -> Self {
        Self {
            node_longitude_deg: NODE_LONGITUDE_DEG,
            inclination_deg: ORBIT_INCLINATION_DEG,
            exaggeration: SIDE_VIEW_EXAGGERATION,
            sample_step_deg: ORBIT_SAMPLE_STEP_DEG,
        }
    }
}

impl OrbitModel {
    /// Largest on-screen elevation for an orbit of `radius`.
    pub fn max_elevation(&self, radius: f64) -> f64 {
        radius * self.inclination_deg.to_radians().sin() * self.exaggeration
    }

    /// Height of the Moon above (+) or below (−) the ecliptic line.
    pub fn projected_elevation(&self, orbit_angle_deg: f64, radius: f64) -> f64 {
        let from_node = (orbit_angle_deg - self.node_longitude_deg).to_radians();
        self.max_elevation(radius) * from_node.sin()
    }

    /// Closed polyline through the orbit sampled every `sample_step_deg`.
    ///
    /// # Panics
    /// If `radius` is not positive or the sample step is below
    /// [`MIN_SAMPLE_STEP_DEG`].
    pub fn tilted_orbit_path(&self, center_x: f64, center_y: f64, radius: f64) -> ShapePath {
        assert!(radius > 0.0, "orbit radius must be positive, got {radius}");
        assert!(
            self.sample_step_deg >= MIN_SAMPLE_STEP_DEG,
            "orbit sample step must be at least {MIN_SAMPLE_STEP_DEG}°, got {}",
            self.sample_step_deg
        );

        let samples = (360.0 / self.sample_step_deg).ceil() as usize;
        let mut path = ShapePath::with_capacity(samples + 2);
        for i in 0..samples {
            let deg = i as f64 * self.sample_step_deg;
            let p = self.side_position(center_x, center_y, radius, deg);
            path = if i == 0 { path.move_to(p) } else { path.line_to(p) };
        }
        path.close()
    }

    /// Moon position in the side view.
    pub fn side_position(
        &self,
        center_x: f64,
        center_y: f64,
        radius: f64,
        orbit_angle_deg: f64,
    ) -> PathPoint {
        PathPoint::new(
            center_x + radius * orbit_angle_deg.to_radians().sin(),
            center_y - self.projected_elevation(orbit_angle_deg, radius),
        )
    }

    /// Ascending and descending node markers; both sit on the ecliptic line.
    pub fn node_positions(&self, center_x: f64, center_y: f64, radius: f64) -> [PathPoint; 2] {
        let x_at = |deg: f64| center_x + radius * deg.to_radians().sin();
        [
            PathPoint::new(x_at(self.node_longitude_deg), center_y),
            PathPoint::new(x_at(self.node_longitude_deg + 180.0), center_y),
        ]
    }
}

/// Moon position in the top-down view. Orbital angle 0° is straight up.
pub fn top_view_position(
    center_x: f64,
    center_y: f64,
    radius: f64,
    orbit_angle_deg: f64,
) -> PathPoint {
    let (sin, cos) = orbit_angle_deg.to_radians().sin_cos();
    PathPoint::new(center_x + radius * sin, center_y - radius * cos)
}

/// Tilted orbit path with the default orbit model.
pub fn tilted_orbit_path(center_x: f64, center_y: f64, radius: f64) -> ShapePath {
    OrbitModel::default().tilted_orbit_path(center_x, center_y, radius)
}

/// Elevation above the ecliptic with the default orbit model.
///
/// # Example
/// ```
/// use moon_phase_lib::side_view::projected_elevation;
///
/// assert!(projected_elevation(80.0, 100.0).abs() < 1e-9);
/// assert!(projected_elevation(170.0, 100.0) > 50.0);
/// ```
pub fn projected_elevation(orbit_angle_deg: f64, radius: f64) -> f64 {
    OrbitModel::default().projected_elevation(orbit_angle_deg, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;

    const R: f64 = 100.0;

    #[test]
    fn test_zero_elevation_at_nodes() {
        assert!(projected_elevation(NODE_LONGITUDE_DEG, R).abs() < 1e-9);
        assert!(projected_elevation(NODE_LONGITUDE_DEG + 180.0, R).abs() < 1e-9);
        assert!(projected_elevation(NODE_LONGITUDE_DEG - 360.0, R).abs() < 1e-9);
    }

    #[test]
    fn test_extremes_ninety_degrees_from_nodes() {
        let model = OrbitModel::default();
        let peak = model.max_elevation(R);
        assert!((projected_elevation(NODE_LONGITUDE_DEG + 90.0, R) - peak).abs() < 1e-9);
        assert!((projected_elevation(NODE_LONGITUDE_DEG - 90.0, R) + peak).abs() < 1e-9);

        for deg in 0..360 {
            assert!(projected_elevation(deg as f64, R).abs() <= peak + 1e-9);
        }
    }

    #[test]
    fn test_peak_value() {
        // 100 · sin(5.14°) · 6
        assert!((OrbitModel::default().max_elevation(R) - 53.7538).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_path_samples() {
        let path = tilted_orbit_path(200.0, 150.0, R);
        assert!(path.is_closed());
        // 72 samples plus Close
        assert_eq!(path.segments().len(), 73);
        assert_eq!(
            path.segments()[0],
            PathSegment::MoveTo(PathPoint::new(200.0, 150.0 - projected_elevation(0.0, R)))
        );

        let b = path.bounds().unwrap();
        assert!(b.min_x >= 200.0 - R - 1e-9 && b.max_x <= 200.0 + R + 1e-9);
        let peak = OrbitModel::default().max_elevation(R);
        assert!(b.min_y >= 150.0 - peak - 1e-9 && b.max_y <= 150.0 + peak + 1e-9);
    }

    #[test]
    fn test_uneven_step_still_closes() {
        let model = OrbitModel {
            sample_step_deg: 7.0,
            ..OrbitModel::default()
        };
        let path = model.tilted_orbit_path(0.0, 0.0, R);
        assert!(path.is_closed());
        assert_eq!(path.segments().len(), 52 + 1);
    }

    #[test]
    fn test_nodes_on_ecliptic() {
        let model = OrbitModel::default();
        let [ascending, descending] = model.node_positions(200.0, 150.0, R);
        assert_eq!(ascending.y, 150.0);
        assert_eq!(descending.y, 150.0);
        assert!((ascending.x - (200.0 + R * 80f64.to_radians().sin())).abs() < 1e-9);
        assert!((ascending.x - 200.0 + (descending.x - 200.0)).abs() < 1e-9);

        let moon = model.side_position(200.0, 150.0, R, NODE_LONGITUDE_DEG);
        assert!((moon.x - ascending.x).abs() < 1e-9);
        assert!((moon.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_view_position() {
        let top = top_view_position(0.0, 0.0, R, 0.0);
        assert!(top.x.abs() < 1e-9 && (top.y + R).abs() < 1e-9);
        let right = top_view_position(0.0, 0.0, R, 90.0);
        assert!((right.x - R).abs() < 1e-9 && right.y.abs() < 1e-9);
    }

    #[test]
    fn test_finest_step_is_bounded() {
        let model = OrbitModel {
            sample_step_deg: MIN_SAMPLE_STEP_DEG,
            ..OrbitModel::default()
        };
        let path = model.tilted_orbit_path(0.0, 0.0, R);
        assert!(path.is_closed());
        assert!(path.segments().len() <= 3602);
    }

    #[test]
    #[should_panic(expected = "orbit sample step must be at least")]
    fn test_rejects_vanishing_step() {
        let model = OrbitModel {
            sample_step_deg: 1e-300,
            ..OrbitModel::default()
        };
        model.tilted_orbit_path(0.0, 0.0, R);
    }

    #[test]
    #[should_panic(expected = "orbit radius must be positive")]
    fn test_rejects_non_positive_radius() {
        tilted_orbit_path(0.0, 0.0, -1.0);
    }
}
