//! # Terminator Outline
//!
//! Builds the lit region of the Moon's disk as seen from Earth, centered on
//! the origin. The outline is one semicircle on the lit limb closed by half
//! of a terminator ellipse whose horizontal semi-axis is
//! `kx = (2·illum − 1)·r`:
//!
//! | phase        | `kx` | terminator                          |
//! |--------------|------|-------------------------------------|
//! | New          | −r   | hugs the lit limb, no lit area      |
//! | Quarter      | 0    | straight vertical diameter          |
//! | Full         | +r   | hugs the opposite limb, whole disk  |
//!
//! Waxing phases light the right limb, waning phases the left. The arc's
//! sweep flips with the sign of `kx`; because the arc is flat exactly when
//! the flip happens, the outline stays continuous across the quarters.

use crate::angle::normalize;
use crate::lunar::illuminated_fraction;
use crate::path::{PathPoint, ShapePath};

/// Signed horizontal semi-axis of the terminator ellipse.
pub fn terminator_half_axis(phase_angle_deg: f64, radius: f64) -> f64 {
    (2.0 * illuminated_fraction(phase_angle_deg) - 1.0) * radius
}

/// Closed outline of the lit part of a disk of `radius`.
///
/// The path starts and ends at the top of the disk `(0, -r)` and passes
/// through the bottom `(0, r)`, so it never crosses itself.
///
/// # Panics
/// If `radius` is not positive.
///
/// # Example
/// ```
/// use moon_phase_lib::terminator::moon_outline;
///
/// let first_quarter = moon_outline(90.0, 30.0);
/// assert!(first_quarter.is_closed());
/// assert!(first_quarter.to_svg().starts_with("M 0 -30 A 30 30 0 0 1 0 30"));
/// ```
pub fn moon_outline(phase_angle_deg: f64, radius: f64) -> ShapePath {
    assert!(radius > 0.0, "moon radius must be positive, got {radius}");

    let phase = normalize(phase_angle_deg) / 360.0;
    let kx = terminator_half_axis(phase_angle_deg, radius);
    let top = PathPoint::new(0.0, -radius);
    let bottom = PathPoint::new(0.0, radius);

    // Waxing: right limb clockwise, terminator bulges left once past quarter.
    // Waning: left limb counter-clockwise, mirrored.
    let waxing = phase < 0.5;
    let limb_sweep = waxing;
    let terminator_sweep = (kx >= 0.0) == waxing;

    ShapePath::with_capacity(4)
        .move_to(top)
        .arc_to(radius, radius, limb_sweep, bottom)
        .arc_to(kx.abs(), radius, terminator_sweep, top)
        .close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;
    use core::f64::consts::PI;

    const R: f64 = 30.0;

    fn terminator_sweep(path: &ShapePath) -> bool {
        match path.segments()[2] {
            PathSegment::ArcTo { sweep, .. } => sweep,
            other => panic!("expected terminator arc, got {other:?}"),
        }
    }

    #[test]
    fn test_svg_matches_reference_layout() {
        assert_eq!(
            moon_outline(0.0, R).to_svg(),
            "M 0 -30 A 30 30 0 0 1 0 30 A 30 30 0 0 0 0 -30 Z"
        );
        assert_eq!(
            moon_outline(180.0, R).to_svg(),
            "M 0 -30 A 30 30 0 0 0 0 30 A 30 30 0 0 0 0 -30 Z"
        );
    }

    #[test]
    fn test_lit_area_follows_illumination() {
        let disk = PI * R * R;
        for deg in (0..360).step_by(15) {
            let a = deg as f64;
            let expected = illuminated_fraction(a) * disk;
            let actual = moon_outline(a, R).area();
            assert!(
                (actual - expected).abs() < 0.01 * disk,
                "phase {a}: area {actual} vs {expected}"
            );
        }
    }

    #[test]
    fn test_lit_side() {
        // Waxing crescent: a point near the right limb is lit, the center is not
        let crescent = moon_outline(45.0, R);
        assert!(crescent.contains(PathPoint::new(R * 0.95, 0.0)));
        assert!(!crescent.contains(PathPoint::new(0.0, 0.0)));
        assert!(!crescent.contains(PathPoint::new(-R * 0.5, 0.0)));

        // Waning gibbous: left limb and center lit, right limb dark
        let gibbous = moon_outline(225.0, R);
        assert!(gibbous.contains(PathPoint::new(-R * 0.95, 0.0)));
        assert!(gibbous.contains(PathPoint::new(0.0, 0.0)));
        assert!(!gibbous.contains(PathPoint::new(R * 0.95, 0.0)));
    }

    #[test]
    fn test_closed_and_bounded_at_every_degree() {
        for deg in 0..360 {
            let path = moon_outline(deg as f64, R);
            assert!(path.is_closed(), "phase {deg} not closed");
            assert_eq!(path.start_point(), Some(PathPoint::new(0.0, -R)));
            assert_eq!(path.end_point(), path.start_point());

            let b = path.bounds().unwrap();
            let eps = 1e-9;
            assert!(b.min_x >= -R - eps && b.max_x <= R + eps, "phase {deg}: {b:?}");
            assert!(b.min_y >= -R - eps && b.max_y <= R + eps, "phase {deg}: {b:?}");
        }
    }

    #[test]
    fn test_continuous_through_quarters() {
        // Sweep flips at the quarter but the arc is flat there, so the
        // shape barely moves across the flip
        for quarter in [90.0, 270.0] {
            let before = moon_outline(quarter - 0.001, R);
            let after = moon_outline(quarter + 0.001, R);
            assert_ne!(terminator_sweep(&before), terminator_sweep(&after));
            assert!((before.area() - after.area()).abs() < 0.5);
        }
    }

    #[test]
    fn test_half_axis_range() {
        assert_eq!(terminator_half_axis(0.0, R), -R);
        assert_eq!(terminator_half_axis(180.0, R), R);
        assert!(terminator_half_axis(90.0, R).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(moon_outline(123.4, R), moon_outline(123.4, R));
    }

    #[test]
    #[should_panic(expected = "moon radius must be positive")]
    fn test_rejects_non_positive_radius() {
        moon_outline(45.0, 0.0);
    }
}
