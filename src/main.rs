//! # Moon Phases Command Line
//!
//! Terminal front-end for the phase and eclipse engine. Every command loads
//! the configuration, builds the engine from it and prints either ASCII art,
//! SVG path data or JSON to stdout. Diagnostics go to stderr.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use moon_phase_lib::{
    config::{Config, CONFIG_FILE},
    lunar,
    renderer::{ascii_top_view, draw_ascii, render_phase_strip},
    terminator::moon_outline,
    view::{drag_angle, InteractionState, ViewMode},
    MoonState,
};
use std::path::PathBuf;

/// Rows of each disk in the phase strip.
const STRIP_ROWS: usize = 7;

/// Radius of the ASCII top view in rows.
const TOP_VIEW_RADIUS: usize = 6;

#[derive(Parser, Debug)]
#[command(
    name = "moon-phases",
    about = "Lunar phase and eclipse geometry explorer"
)]
pub struct Cli {
    /// Configuration file (defaults to moon-config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Show the Moon for an orbital angle
    Show {
        /// Orbital angle in degrees (0 = top of the orbit diagram)
        #[arg(allow_negative_numbers = true)]
        angle: f64,
        /// Top-down orbit diagram (default)
        #[arg(long, conflicts_with = "side")]
        top: bool,
        /// Edge-on orbit diagram with eclipse geometry
        #[arg(long)]
        side: bool,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// SVG path data of the lit region for a phase angle
    Outline {
        /// Phase angle in degrees (0 = New, 180 = Full)
        #[arg(allow_negative_numbers = true)]
        phase_angle: f64,
        /// Disk radius
        #[arg(long, default_value = "50")]
        radius: f64,
    },
    /// SVG path data of the tilted orbit seen edge-on
    Orbit {
        /// Center x
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        cx: f64,
        /// Center y
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        cy: f64,
        /// Orbit radius
        #[arg(long, default_value = "100")]
        radius: f64,
    },
    /// The eight named phases with the current one highlighted
    Strip {
        /// Orbital angle in degrees
        #[arg(default_value = "45", allow_negative_numbers = true)]
        angle: f64,
    },
    /// Orbital angle for a pointer offset from the orbit center (y down)
    Drag {
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
    },
    /// Mean phase for a calendar date
    Date {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Write the default configuration
    InitConfig {
        /// Destination (defaults to moon-config.toml)
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// An explicit `--config` must load; otherwise fall back to defaults.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::try_load_from_path(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(Config::load()),
    }
}

fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date `{}`, expected YYYY-MM-DD", s))
}

fn view_mode(top: bool, side: bool) -> ViewMode {
    if side && !top {
        ViewMode::Side
    } else {
        ViewMode::Top
    }
}

/// Print a snapshot in the requested view. The side diagram is only
/// available when the engine computed one.
fn print_scene(mut state: MoonState, config: &Config, mode: ViewMode) {
    match mode {
        ViewMode::Top => {
            state.side_view = None;
            draw_ascii(&state, config);
            println!();
            println!("{}:", mode);
            for line in ascii_top_view(state.orbit_angle_deg, TOP_VIEW_RADIUS) {
                println!("{}", line);
            }
        }
        ViewMode::Side => {
            if state.side_view.is_none() {
                eprintln!("Warning: side view disabled in configuration (display.include_side_view)");
            }
            draw_ascii(&state, config);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let engine = config.engine();
    let display = &config.display;

    match cli.command {
        Commands::Show {
            angle,
            top,
            side,
            json,
        } => {
            let session = InteractionState::new(angle, view_mode(top, side));
            let state = engine.snapshot(
                session.orbit_angle(),
                display.moon_radius,
                display.orbit_radius,
            );
            if json {
                let text = serde_json::to_string_pretty(&state).context("serialize snapshot")?;
                println!("{}", text);
            } else {
                print_scene(state, &config, session.view_mode());
            }
        }

        Commands::Outline {
            phase_angle,
            radius,
        } => {
            if !(radius > 0.0) {
                bail!("radius must be positive, got {}", radius);
            }
            let outline = moon_outline(phase_angle, radius);
            println!("{}", outline.to_svg());
        }

        Commands::Orbit { cx, cy, radius } => {
            if !(radius > 0.0) {
                bail!("radius must be positive, got {}", radius);
            }
            let model = config.orbit_model();
            println!("{}", model.tilted_orbit_path(cx, cy, radius).to_svg());
            let [ascending, descending] = model.node_positions(cx, cy, radius);
            println!(
                "nodes: ascending x={:.3}, descending x={:.3} (y={:.3})",
                ascending.x, descending.x, cy
            );
        }

        Commands::Strip { angle } => {
            let previews = engine.phase_strip(angle, display.moon_radius);
            println!("{}", render_phase_strip(&previews, STRIP_ROWS));
        }

        Commands::Drag { dx, dy } => {
            let mut session = InteractionState::default();
            if !session.drag_to(dx, dy) && drag_angle(dx, dy).is_none() {
                eprintln!("Warning: pointer on the orbit center, angle unchanged");
            }
            let angle = session.orbit_angle();
            println!(
                "orbit angle {:.2}° -> {} ({}% lit, {})",
                angle,
                engine.phase(angle),
                engine
                    .snapshot(angle, display.moon_radius, display.orbit_radius)
                    .illuminated_percent(),
                engine.eclipse(angle)
            );
        }

        Commands::Date { date } => {
            let date = parse_date(&date)?;
            let phase_angle = lunar::phase_angle_for_date(date);
            let orbit_angle = lunar::orbit_angle_for_date(date);
            println!(
                "{}: moon age {:.1} days, phase angle {:.1}°",
                date,
                lunar::age_days(phase_angle),
                phase_angle
            );
            let state = engine.snapshot(orbit_angle, display.moon_radius, display.orbit_radius);
            print_scene(state, &config, ViewMode::Top);
        }

        Commands::InitConfig { path, force } => {
            let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
            if path.exists() && !force {
                bail!(
                    "{} already exists, pass --force to overwrite",
                    path.display()
                );
            }
            Config::default()
                .save_to_path(&path)
                .with_context(|| format!("write config {}", path.display()))?;
        }
    }

    Ok(())
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
