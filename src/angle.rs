//! # Angle Normalization
//!
//! Every angle the engine touches is measured in degrees and may arrive in any
//! range: drag handlers produce values in (-180, 180], sliders may overshoot,
//! and derived quantities add fixed offsets. All of them are folded into
//! `[0, 360)` here before any bucket lookup or trigonometry.

/// Offset between the orbit's reference direction and the Sun–Earth axis.
///
/// Orbital angle 0° is the top of the top-down diagram while the Sun sits to
/// the left, so 0° on the orbit is First Quarter rather than New Moon.
pub const PHASE_OFFSET_DEG: f64 = 90.0;

/// Fold any real angle in degrees into `[0, 360)`.
///
/// Adds 360 only to negative remainders, so values already in range come
/// back unchanged and tiny negative inputs land on `0.0` instead of `360.0`.
/// Non-finite input propagates as NaN.
///
/// # Example
/// ```
/// use moon_phase_lib::angle::normalize;
///
/// assert_eq!(normalize(-90.0), 270.0);
/// assert_eq!(normalize(720.0), 0.0);
/// ```
pub fn normalize(angle_deg: f64) -> f64 {
    let mut a = angle_deg % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    // a + 360 rounds up to exactly 360 for a just below zero
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Phase angle for an orbital angle: the orbit position re-based onto the
/// Sun–Earth–Moon geometry.
pub fn phase_angle(orbit_angle_deg: f64) -> f64 {
    normalize(orbit_angle_deg + PHASE_OFFSET_DEG)
}

/// Inverse of [`phase_angle`].
pub fn orbit_angle(phase_angle_deg: f64) -> f64 {
    normalize(phase_angle_deg - PHASE_OFFSET_DEG)
}

/// Shortest angular distance between two angles, in `[0, 180]`.
pub fn separation(a_deg: f64, b_deg: f64) -> f64 {
    let d = normalize(a_deg - b_deg);
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        for a in [-1080.5, -360.0, -0.25, 0.0, 45.0, 359.75, 360.0, 1234.5] {
            let n = normalize(a);
            assert!((0.0..360.0).contains(&n), "normalize({a}) = {n}");
        }
    }

    #[test]
    fn test_normalize_periodicity() {
        for a in [-725.0, -37.5, 0.0, 12.0, 180.0, 271.25, 359.0] {
            assert_eq!(normalize(a), normalize(a + 360.0));
            assert_eq!(normalize(a), normalize(a - 720.0));
        }
    }

    #[test]
    fn test_normalize_tiny_negative() {
        assert_eq!(normalize(-1e-20), 0.0);
        assert!(normalize(-1e-13) < 360.0);
    }

    #[test]
    fn test_phase_offset() {
        assert_eq!(phase_angle(0.0), 90.0);
        assert_eq!(phase_angle(270.0), 0.0);
        assert_eq!(orbit_angle(phase_angle(123.0)), 123.0);
    }

    #[test]
    fn test_separation() {
        assert_eq!(separation(350.0, 10.0), 20.0);
        assert_eq!(separation(10.0, 350.0), 20.0);
        assert_eq!(separation(0.0, 180.0), 180.0);
        assert_eq!(separation(-90.0, 270.0), 0.0);
    }
}
