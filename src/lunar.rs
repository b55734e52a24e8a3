//! Phase classification and illumination for the Moon's visible disk.
//!
//! Phase angle 0° is New Moon (Moon between Sun and Earth) and 180° is Full
//! Moon. Eight named phases each span 45° and are centered on their nominal
//! angle, so New Moon covers [337.5°, 22.5°).
//!
//! The date helper at the bottom is the low-precision mean-phase routine of
//! Schaefer (Sky & Telescope, Mar 1985): ±1 day, good enough to preset the
//! orbit to "roughly today".

use crate::angle::{self, normalize};
use chrono::{Datelike, NaiveDate};
use core::f64::consts::TAU;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of one phase bucket in degrees.
pub const PHASE_BUCKET_DEG: f64 = 45.0;

/// Half-bucket shift that centers each bucket on its phase.
const HALF_BUCKET_DEG: f64 = PHASE_BUCKET_DEG / 2.0;

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_2;

/// The eight named lunar phases in cycle order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    /// All phases, index 0 = New Moon through index 7 = Waning Crescent.
    pub const ALL: [PhaseName; 8] = [
        PhaseName::NewMoon,
        PhaseName::WaxingCrescent,
        PhaseName::FirstQuarter,
        PhaseName::WaxingGibbous,
        PhaseName::FullMoon,
        PhaseName::WaningGibbous,
        PhaseName::LastQuarter,
        PhaseName::WaningCrescent,
    ];

    /// Position in the cycle (0–7).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Phase at a cycle position; wraps modulo 8.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Phase angle the bucket is centered on.
    pub fn center_angle(self) -> f64 {
        self.index() as f64 * PHASE_BUCKET_DEG
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }

    /// Last word of the label, used under the small previews of the phase strip.
    pub fn short_label(self) -> &'static str {
        self.label().rsplit(' ').next().unwrap_or_else(|| self.label())
    }

    /// Two-line description of the Sun–Earth–Moon geometry for this phase.
    pub fn explanation(self) -> &'static str {
        match self {
            PhaseName::NewMoon => {
                "The Moon is between the Sun and Earth.\nThe lit side faces away from us."
            }
            PhaseName::WaxingCrescent => {
                "A sliver of light appears on the right.\nThe Moon moves away from the Sun's direction."
            }
            PhaseName::FirstQuarter => {
                "Half the Moon is illuminated.\nThe Moon is 90° from the Sun."
            }
            PhaseName::WaxingGibbous => {
                "Most of the Moon is lit.\nIt's approaching its full position."
            }
            PhaseName::FullMoon => {
                "The Earth is between the Sun and Moon.\nThe entire face we see is illuminated."
            }
            PhaseName::WaningGibbous => {
                "Light begins to shrink from the right.\nThe Moon moves past full phase."
            }
            PhaseName::LastQuarter => {
                "The left half is illuminated.\nThe Moon is 270° from the Sun."
            }
            PhaseName::WaningCrescent => {
                "A thin sliver remains on the left.\nThe Moon returns toward New Moon."
            }
        }
    }

    /// True for the phases between New and Full.
    pub fn is_waxing(self) -> bool {
        (1..4).contains(&self.index())
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a phase angle into one of the eight named phases.
///
/// The angle is shifted by half a bucket before flooring, so an angle sitting
/// exactly on a boundary (22.5°, 67.5°, …) belongs to the later phase.
///
/// # Example
/// ```
/// use moon_phase_lib::lunar::{classify_phase, PhaseName};
///
/// assert_eq!(classify_phase(180.0), PhaseName::FullMoon);
/// assert_eq!(classify_phase(-90.0), PhaseName::LastQuarter);
/// ```
pub fn classify_phase(phase_angle_deg: f64) -> PhaseName {
    let a = normalize(phase_angle_deg);
    let bucket = (((a + HALF_BUCKET_DEG) % 360.0) / PHASE_BUCKET_DEG).floor() as usize;
    PhaseName::from_index(bucket)
}

/// Fraction of the visible disk that is lit, in `[0, 1]`.
///
/// `(1 - cos(2π·phase)) / 2` with `phase = normalize(angle) / 360`: 0 at New,
/// 1 at Full, 0.5 at both quarters.
pub fn illuminated_fraction(phase_angle_deg: f64) -> f64 {
    let phase = normalize(phase_angle_deg) / 360.0;
    ((1.0 - (phase * TAU).cos()) / 2.0).clamp(0.0, 1.0)
}

/// Mean phase angle (0° = New) for a calendar date at UTC noon.
pub fn phase_angle_for_date(date: NaiveDate) -> f64 {
    // March-based year keeps the Julian-day arithmetic linear
    let (mut y, mut m) = (date.year(), date.month() as i32);
    if m < 3 {
        y -= 1;
        m += 12;
    }
    m += 1;

    // Days since the 1900-01-00 12 UT reference new moon
    let day = date.day() as f64 + 0.5;
    let days = (365.25 * y as f64).floor() + (30.6 * m as f64).floor() + day - 694_039.09;

    let mut cycles = days / SYNODIC_MONTH_DAYS;
    cycles -= cycles.floor();
    normalize(cycles * 360.0)
}

/// Orbital angle that shows the mean phase of `date`.
pub fn orbit_angle_for_date(date: NaiveDate) -> f64 {
    angle::orbit_angle(phase_angle_for_date(date))
}

/// Days since the last mean New Moon for a phase angle.
pub fn age_days(phase_angle_deg: f64) -> f64 {
    normalize(phase_angle_deg) / 360.0 * SYNODIC_MONTH_DAYS
}
