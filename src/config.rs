//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! moon-config.toml file. It covers the orbit model, the eclipse tolerances
//! and the display layout used by the renderers.

use crate::eclipse::{EclipseTolerances, NODE_TOLERANCE_DEG, PHASE_TOLERANCE_DEG};
use crate::engine::{Capabilities, MoonPhaseEngine};
use crate::side_view::{
    OrbitModel, MIN_SAMPLE_STEP_DEG, NODE_LONGITUDE_DEG, ORBIT_INCLINATION_DEG,
    ORBIT_SAMPLE_STEP_DEG, SIDE_VIEW_EXAGGERATION,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "moon-config.toml";

/// Errors that can occur while reading, writing or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    /// File contents are not valid TOML for [`Config`]
    #[error("invalid config format: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("config serialization: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is outside its allowed range
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Application configuration loaded from moon-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Tilted orbit parameters
    pub orbit: OrbitConfig,
    /// Eclipse thresholds
    pub eclipse: EclipseConfig,
    /// Display and UI configuration
    pub display: DisplayConfig,
}

/// Tilted orbit configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrbitConfig {
    /// Orbital angle of the ascending node in degrees
    pub node_longitude_deg: f64,
    /// Orbital inclination against the ecliptic in degrees
    pub inclination_deg: f64,
    /// Vertical inflation of the tilt in the side view
    pub side_view_exaggeration: f64,
    /// Angular step between orbit path samples, [0.1, 90] degrees
    pub sample_step_deg: f64,
}

/// Eclipse tolerance configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EclipseConfig {
    /// Maximum distance from a node in degrees
    pub node_tolerance_deg: f64,
    /// Maximum distance from New or Full in degrees of phase angle
    pub phase_tolerance_deg: f64,
}

/// Display and visualization configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Canvas width in pixels
    pub width: i32,
    /// Canvas height in pixels
    pub height: i32,
    /// Radius of the Earth-view Moon disk in pixels
    pub moon_radius: f64,
    /// Radius of the orbit in the side view in pixels
    pub orbit_radius: f64,
    /// Show the edge-on orbit and eclipse detection
    pub include_side_view: bool,
    /// Rows of the ASCII Earth-view disk
    pub ascii_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            orbit: OrbitConfig {
                node_longitude_deg: NODE_LONGITUDE_DEG,
                inclination_deg: ORBIT_INCLINATION_DEG,
                side_view_exaggeration: SIDE_VIEW_EXAGGERATION,
                sample_step_deg: ORBIT_SAMPLE_STEP_DEG,
            },
            eclipse: EclipseConfig {
                node_tolerance_deg: NODE_TOLERANCE_DEG,
                phase_tolerance_deg: PHASE_TOLERANCE_DEG,
            },
            display: DisplayConfig {
                width: 400,
                height: 300,
                moon_radius: 30.0,
                orbit_radius: 100.0,
                include_side_view: true,
                ascii_rows: 15,
            },
        }
    }
}

impl Config {
    /// Load configuration from moon-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_path(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                eprintln!("Info: No config file found, using default configuration");
                Self::default()
            }
            Err(e) => {
                eprintln!("Warning: {}", e);
                eprintln!("Using default configuration");
                Self::default()
            }
        }
    }

    /// Load and validate configuration, reporting every failure
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save current configuration as pretty TOML
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.validate()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        eprintln!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Check that every value is usable by the engine and renderers
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn finite(field: &'static str, v: f64) -> Result<(), ConfigError> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("{v} is not a finite number"),
                })
            }
        }
        fn positive(field: &'static str, v: f64) -> Result<(), ConfigError> {
            finite(field, v)?;
            if v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("{v} must be greater than zero"),
                })
            }
        }

        finite("orbit.node_longitude_deg", self.orbit.node_longitude_deg)?;
        finite("orbit.inclination_deg", self.orbit.inclination_deg)?;
        positive(
            "orbit.side_view_exaggeration",
            self.orbit.side_view_exaggeration,
        )?;
        positive("orbit.sample_step_deg", self.orbit.sample_step_deg)?;
        if !(MIN_SAMPLE_STEP_DEG..=90.0).contains(&self.orbit.sample_step_deg) {
            return Err(ConfigError::Invalid {
                field: "orbit.sample_step_deg",
                reason: format!(
                    "{} is outside [{}, 90] degrees",
                    self.orbit.sample_step_deg, MIN_SAMPLE_STEP_DEG
                ),
            });
        }

        positive("eclipse.node_tolerance_deg", self.eclipse.node_tolerance_deg)?;
        positive(
            "eclipse.phase_tolerance_deg",
            self.eclipse.phase_tolerance_deg,
        )?;

        positive("display.moon_radius", self.display.moon_radius)?;
        positive("display.orbit_radius", self.display.orbit_radius)?;
        if self.display.width <= 0 || self.display.height <= 0 {
            return Err(ConfigError::Invalid {
                field: "display",
                reason: format!(
                    "canvas {}x{} must have positive size",
                    self.display.width, self.display.height
                ),
            });
        }
        if self.display.ascii_rows < 3 {
            return Err(ConfigError::Invalid {
                field: "display.ascii_rows",
                reason: format!("{} is fewer than 3 rows", self.display.ascii_rows),
            });
        }
        Ok(())
    }

    pub fn orbit_model(&self) -> OrbitModel {
        OrbitModel {
            node_longitude_deg: self.orbit.node_longitude_deg,
            inclination_deg: self.orbit.inclination_deg,
            exaggeration: self.orbit.side_view_exaggeration,
            sample_step_deg: self.orbit.sample_step_deg,
        }
    }

    pub fn tolerances(&self) -> EclipseTolerances {
        EclipseTolerances {
            node_tolerance_deg: self.eclipse.node_tolerance_deg,
            phase_tolerance_deg: self.eclipse.phase_tolerance_deg,
        }
    }

    /// Engine with this configuration; the side view flag selects the
    /// full or simple capability set.
    pub fn engine(&self) -> MoonPhaseEngine {
        let capabilities = if self.display.include_side_view {
            Capabilities::FULL
        } else {
            Capabilities::SIMPLE
        };
        MoonPhaseEngine::new(self.orbit_model(), self.tolerances(), capabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.orbit.node_longitude_deg, 80.0);
        assert_eq!(config.orbit.inclination_deg, 5.14);
        assert_eq!(config.eclipse.node_tolerance_deg, 15.0);
        assert_eq!(config.eclipse.phase_tolerance_deg, 18.0);
        assert!(config.display.include_side_view);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_engine_matches_constants() {
        assert_eq!(Config::default().engine(), MoonPhaseEngine::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.eclipse.node_tolerance_deg = 12.5;
        config.display.include_side_view = false;

        config.save_to_path(temp_file.path()).unwrap();
        let loaded = Config::try_load_from_path(temp_file.path()).unwrap();
        assert_eq!(loaded.eclipse.node_tolerance_deg, 12.5);
        assert_eq!(loaded.engine().capabilities, Capabilities::SIMPLE);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config, Config::default());
        assert!(matches!(
            Config::try_load_from_path("/nonexistent/path"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_invalid_toml_falls_back() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "[orbit\nnode_longitude_deg = ").unwrap();
        assert!(matches!(
            Config::try_load_from_path(temp_file.path()),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(Config::load_from_path(temp_file.path()), Config::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.eclipse.phase_tolerance_deg = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("eclipse.phase_tolerance_deg"));

        let mut config = Config::default();
        config.orbit.sample_step_deg = 120.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.moon_radius = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sample_step_bounds() {
        let mut config = Config::default();
        config.orbit.sample_step_deg = 1e-300;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("orbit.sample_step_deg"));

        config.orbit.sample_step_deg = 0.05;
        assert!(config.validate().is_err());

        config.orbit.sample_step_deg = MIN_SAMPLE_STEP_DEG;
        assert!(config.validate().is_ok());
        // Every accepted step yields a usable orbit path
        assert!(config.orbit_model().tilted_orbit_path(0.0, 0.0, 100.0).is_closed());
    }

    #[test]
    fn test_invalid_values_fail_to_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.display.orbit_radius = -5.0;
        fs::write(temp_file.path(), toml::to_string(&config).unwrap()).unwrap();
        assert!(matches!(
            Config::try_load_from_path(temp_file.path()),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
