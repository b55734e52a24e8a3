//! # Moon Phase Rendering
//!
//! This module turns a [`MoonState`] into pixels or terminal text. It is a
//! thin adapter over the engine's structured paths: the lit region is filled
//! with an even-odd test against the flattened terminator outline, and the
//! side view is drawn as the flattened tilted-orbit polyline.
//!
//! Two targets are supported:
//! - any embedded-graphics `DrawTarget<Color = BinaryColor>` (e-ink panels,
//!   simulators, `MockDisplay` in tests)
//! - ASCII for terminals and development

use crate::config::Config;
use crate::path::{even_odd_contains, PathPoint};
use crate::side_view::top_view_position;
use crate::{MoonState, PhasePreview, SideViewState};
use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
    text::Text,
};

/// Gap between the canvas edge and the Earth-view disk.
const MARGIN: i32 = 10;

/// Width of the ASCII side view in columns.
const SIDE_VIEW_COLUMNS: usize = 61;

/// Glyphs for the ASCII Earth view.
const LIT: char = '#';
const DARK: char = '.';

/// Cell classification of the Earth-view disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DiskCell {
    Outside,
    Dark,
    Lit,
}

/// Classify the point `(x, y)` of a disk of `radius` against the state's
/// outline, which may have been built for a different radius.
fn classify_cell(
    rings: &[Vec<PathPoint>],
    outline_radius: f64,
    radius: f64,
    x: f64,
    y: f64,
) -> DiskCell {
    if x * x + y * y > radius * radius {
        return DiskCell::Outside;
    }
    let scale = outline_radius / radius;
    if even_odd_contains(rings, PathPoint::new(x * scale, y * scale)) {
        DiskCell::Lit
    } else {
        DiskCell::Dark
    }
}

/// Radius the state's outline was built for: half its height.
fn outline_radius(state: &MoonState) -> f64 {
    state
        .outline
        .bounds()
        .map(|b| b.height() / 2.0)
        .filter(|r| *r > 0.0)
        .unwrap_or(1.0)
}

/// Render the scene to an e-ink style binary display.
///
/// Layout: phase name and eclipse banner along the top, the Earth-view disk
/// on the left, and (when the state carries one) the side view filling the
/// rest of the canvas.
pub fn draw_eink<S: DrawTarget<Color = BinaryColor, Error = core::convert::Infallible>>(
    state: &MoonState,
    config: &Config,
    display: &mut S,
) {
    let width = config.display.width;
    let height = config.display.height;
    let title_style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    let small_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

    Text::new(state.phase.label(), Point::new(2, 16), title_style)
        .draw(display)
        .ok();
    if let Some(label) = state.eclipse.label() {
        Text::new(label, Point::new(2, 30), small_style)
            .draw(display)
            .ok();
    }

    // Earth-view disk, outline ring plus lit pixels
    let radius = config.display.moon_radius;
    let r_px = radius.round() as i32;
    let disk_center = Point::new(MARGIN + r_px, height / 2);
    Circle::with_center(disk_center, (2 * r_px + 1) as u32)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display)
        .ok();

    let flattened = state.outline.flatten();
    let rings = &flattened;
    let source_radius = outline_radius(state);
    let lit_pixels = (-r_px..=r_px).flat_map(move |dy| {
        (-r_px..=r_px).filter_map(move |dx| {
            let cell = classify_cell(rings, source_radius, radius, dx as f64, dy as f64);
            (cell == DiskCell::Lit).then(|| Pixel(disk_center + Point::new(dx, dy), BinaryColor::On))
        })
    });
    display.draw_iter(lit_pixels).ok();

    Text::new(
        &format!("{}% lit", state.illuminated_percent()),
        Point::new(MARGIN, disk_center.y + r_px + 14),
        small_style,
    )
    .draw(display)
    .ok();

    if let Some(side) = &state.side_view {
        let left = disk_center.x + r_px + MARGIN;
        let center = Point::new(left + (width - left) / 2, height / 2);
        draw_side_view(side, state, center, left, width, display);
    }
}

/// Ecliptic, tilted orbit, nodes, Earth and Moon around `center`.
fn draw_side_view<S: DrawTarget<Color = BinaryColor, Error = core::convert::Infallible>>(
    side: &SideViewState,
    state: &MoonState,
    center: Point,
    left: i32,
    right: i32,
    display: &mut S,
) {
    let thin = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    let to_screen = |p: PathPoint| center + Point::new(p.x.round() as i32, p.y.round() as i32);

    Line::new(Point::new(left, center.y), Point::new(right - 1, center.y))
        .into_styled(thin)
        .draw(display)
        .ok();

    for ring in side.orbit_path.flatten() {
        for edge in ring.windows(2) {
            Line::new(to_screen(edge[0]), to_screen(edge[1]))
                .into_styled(thin)
                .draw(display)
                .ok();
        }
    }

    for node in side.nodes {
        Circle::with_center(to_screen(node), 8)
            .into_styled(thin)
            .draw(display)
            .ok();
    }

    Circle::with_center(center, 12)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display)
        .ok();

    let moon = to_screen(side.moon);
    Circle::with_center(moon, 9)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display)
        .ok();

    if state.eclipse.is_eclipse() {
        Circle::with_center(moon, 21)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
            .draw(display)
            .ok();
    }
}

/// ASCII Earth view: `rows` lines of `2 * rows` columns (terminal cells are
/// roughly twice as tall as they are wide).
pub fn ascii_disk(state: &MoonState, rows: usize) -> Vec<String> {
    let radius = rows as f64 / 2.0;
    let rings = state.outline.flatten();
    let source_radius = outline_radius(state);

    (0..rows)
        .map(|row| {
            let y = row as f64 + 0.5 - radius;
            (0..rows * 2)
                .map(|col| {
                    let x = (col as f64 + 0.5) / 2.0 - radius;
                    match classify_cell(&rings, source_radius, radius, x, y) {
                        DiskCell::Outside => ' ',
                        DiskCell::Dark => DARK,
                        DiskCell::Lit => LIT,
                    }
                })
                .collect()
        })
        .collect()
}

/// ASCII side view: ecliptic `-`, orbit `.`, nodes `+`, Earth `E`, Moon `O`.
pub fn ascii_side_view(side: &SideViewState, orbit_radius: f64) -> Vec<String> {
    let half_width = (SIDE_VIEW_COLUMNS / 2) as f64 - 1.0;
    let sx = half_width / orbit_radius;
    let sy = sx / 2.0;

    let max_elevation = side
        .orbit_path
        .bounds()
        .map(|b| b.min_y.abs().max(b.max_y.abs()))
        .unwrap_or(0.0);
    let half_height = (max_elevation * sy).ceil() as usize + 1;
    let rows = half_height * 2 + 1;

    let mut grid = vec![vec![' '; SIDE_VIEW_COLUMNS]; rows];
    let mid_row = half_height as f64;
    let mid_col = (SIDE_VIEW_COLUMNS / 2) as f64;
    let cell = |p: PathPoint| -> Option<(usize, usize)> {
        let row = (mid_row + p.y * sy).round();
        let col = (mid_col + p.x * sx).round();
        (row >= 0.0 && col >= 0.0 && (row as usize) < rows && (col as usize) < SIDE_VIEW_COLUMNS)
            .then(|| (row as usize, col as usize))
    };

    for c in grid[half_height].iter_mut() {
        *c = '-';
    }
    for p in side.orbit_path.flatten().into_iter().flatten() {
        if let Some((r, c)) = cell(p) {
            grid[r][c] = '.';
        }
    }
    for node in side.nodes {
        if let Some((r, c)) = cell(node) {
            grid[r][c] = '+';
        }
    }
    grid[half_height][SIDE_VIEW_COLUMNS / 2] = 'E';
    if let Some((r, c)) = cell(side.moon) {
        grid[r][c] = 'O';
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// ASCII top view: orbit `.`, Earth `E`, Moon `O`, with the Sun off to the
/// left. `radius` is in rows; columns are doubled.
pub fn ascii_top_view(orbit_angle_deg: f64, radius: usize) -> Vec<String> {
    let rows = radius * 2 + 1;
    let cols = radius * 4 + 1;
    let mut grid = vec![vec![' '; cols]; rows];
    let center = radius as f64;
    let mut plot = |p: PathPoint, ch: char| {
        let row = p.y.round();
        let col = (p.x * 2.0).round();
        if row >= 0.0 && col >= 0.0 && (row as usize) < rows && (col as usize) < cols {
            grid[row as usize][col as usize] = ch;
        }
    };

    let mut angle = 0.0;
    while angle < 360.0 {
        plot(top_view_position(center, center, center, angle), '.');
        angle += 10.0;
    }
    plot(PathPoint::new(center, center), 'E');
    plot(top_view_position(center, center, center, orbit_angle_deg), 'O');

    grid.into_iter()
        .enumerate()
        .map(|(row, line)| {
            let prefix = if row == radius { "Sun <- " } else { "       " };
            format!("{}{}", prefix, line.into_iter().collect::<String>())
        })
        .collect()
}

/// Full ASCII scene as a string.
pub fn render_ascii(state: &MoonState, config: &Config) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{}  ({}% lit, orbit {:.1}°, phase {:.1}°)",
        state.phase,
        state.illuminated_percent(),
        state.orbit_angle_deg,
        state.phase_angle_deg
    ));
    if let Some(label) = state.eclipse.label() {
        lines.push(format!("*** {} ***", label));
    }
    lines.push(String::new());
    lines.extend(ascii_disk(state, config.display.ascii_rows));
    lines.push(String::new());
    lines.extend(state.explanation().lines().map(str::to_string));

    if let Some(side) = &state.side_view {
        lines.push(String::new());
        lines.push(format!(
            "Side view (~{}° tilt, exaggerated), elevation {:+.1}",
            config.orbit.inclination_deg, side.elevation
        ));
        lines.push("Sun <-".to_string());
        lines.extend(ascii_side_view(side, config.display.orbit_radius));
    }

    lines.join("\n")
}

/// Render the scene to stdout.
pub fn draw_ascii(state: &MoonState, config: &Config) {
    println!("{}", render_ascii(state, config));
}

/// Eight small disks side by side with short labels; the active one is
/// bracketed.
pub fn render_phase_strip(previews: &[PhasePreview], rows: usize) -> String {
    let disks: Vec<Vec<String>> = previews
        .iter()
        .map(|preview| {
            let state = MoonState {
                orbit_angle_deg: 0.0,
                phase_angle_deg: preview.phase_angle_deg,
                phase: preview.phase,
                illuminated_fraction: 0.0,
                eclipse: Default::default(),
                outline: preview.outline.clone(),
                side_view: None,
            };
            ascii_disk(&state, rows)
        })
        .collect();

    let cell_width = rows * 2 + 2;
    let mut lines: Vec<String> = (0..rows)
        .map(|row| {
            disks
                .iter()
                .map(|disk| format!(" {} ", disk[row]))
                .collect::<String>()
        })
        .collect();

    let labels: String = previews
        .iter()
        .map(|preview| {
            let label = if preview.active {
                format!("[{}]", preview.phase.short_label())
            } else {
                preview.phase.short_label().to_string()
            };
            format!("{:^width$}", label, width = cell_width)
        })
        .collect();
    lines.push(labels);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Capabilities, MoonPhaseEngine};

    fn state_at(orbit_angle: f64) -> MoonState {
        MoonPhaseEngine::default().snapshot(orbit_angle, 30.0, 100.0)
    }

    fn count(lines: &[String], ch: char) -> usize {
        lines.iter().map(|l| l.chars().filter(|c| *c == ch).count()).sum()
    }

    #[test]
    fn test_ascii_disk_dimensions() {
        let disk = ascii_disk(&state_at(0.0), 15);
        assert_eq!(disk.len(), 15);
        assert!(disk.iter().all(|l| l.chars().count() == 30));
    }

    #[test]
    fn test_ascii_full_and_new() {
        // Orbit 90 -> phase 180 (Full), orbit 270 -> phase 0 (New)
        let full = ascii_disk(&state_at(90.0), 15);
        assert_eq!(count(&full, DARK), 0);
        assert!(count(&full, LIT) > 100);

        let new = ascii_disk(&state_at(270.0), 15);
        assert_eq!(count(&new, LIT), 0);
        assert!(count(&new, DARK) > 100);
    }

    #[test]
    fn test_ascii_first_quarter_lights_right_half() {
        // Orbit 0 -> phase 90 (First Quarter)
        let disk = ascii_disk(&state_at(0.0), 15);
        let middle: Vec<char> = disk[7].chars().collect();
        assert_eq!(middle[2], DARK);
        assert_eq!(middle[27], LIT);
    }

    #[test]
    fn test_ascii_disk_scales_outline() {
        // Outline built at radius 30 rendered at 9 rows
        let full = ascii_disk(&state_at(90.0), 9);
        assert_eq!(count(&full, DARK), 0);
        assert!(count(&full, LIT) > 40);
    }

    #[test]
    fn test_render_ascii_mentions_eclipse() {
        let text = render_ascii(&state_at(80.0), &Config::default());
        assert!(text.contains("Full Moon"));
        assert!(text.contains("*** Lunar Eclipse ***"));
        assert!(text.contains("lunar eclipse!"));
        assert!(text.contains("Side view"));
        assert!(text.contains('O'));
    }

    #[test]
    fn test_render_ascii_simple_variant() {
        let engine = MoonPhaseEngine::default().with_capabilities(Capabilities::SIMPLE);
        let state = engine.snapshot(80.0, 30.0, 100.0);
        let text = render_ascii(&state, &Config::default());
        assert!(!text.contains("Eclipse"));
        assert!(!text.contains("Side view"));
    }

    #[test]
    fn test_ascii_side_view_markers() {
        let state = state_at(170.0);
        let side = state.side_view.as_ref().unwrap();
        let grid = ascii_side_view(side, 100.0);
        assert_eq!(count(&grid, 'E'), 1);
        assert_eq!(count(&grid, 'O'), 1);
        assert_eq!(count(&grid, '+'), 2);
        // Peak elevation puts the Moon well above the ecliptic row
        let ecliptic = grid.iter().position(|l| l.contains('E')).unwrap();
        let moon = grid.iter().position(|l| l.contains('O')).unwrap();
        assert!(moon + 5 < ecliptic);
    }

    #[test]
    fn test_ascii_top_view() {
        let grid = ascii_top_view(90.0, 5);
        assert_eq!(grid.len(), 11);
        assert!(grid[5].starts_with("Sun <- "));
        // Orbit angle 90 sits on Earth's row, to the right
        let row: Vec<char> = grid[5].chars().collect();
        let earth = row.iter().position(|c| *c == 'E').unwrap();
        let moon = row.iter().position(|c| *c == 'O').unwrap();
        assert!(moon > earth);

        let top = ascii_top_view(0.0, 5);
        assert!(top[0].contains('O'));
    }

    #[test]
    fn test_phase_strip_rendering() {
        let previews = MoonPhaseEngine::default().phase_strip(90.0, 14.0);
        let strip = render_phase_strip(&previews, 5);
        let lines: Vec<&str> = strip.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[5].contains("[Moon]"));
        assert!(lines[5].contains("Crescent"));
    }

    mod eink_tests {
        use super::*;
        use embedded_graphics::mock_display::MockDisplay;

        fn small_config() -> Config {
            let mut config = Config::default();
            config.display.width = 64;
            config.display.height = 64;
            config.display.moon_radius = 12.0;
            config.display.orbit_radius = 10.0;
            config
        }

        fn mock() -> MockDisplay<BinaryColor> {
            let mut display = MockDisplay::new();
            display.set_allow_overdraw(true);
            display.set_allow_out_of_bounds_drawing(true);
            display
        }

        fn lit_in_disk(display: &MockDisplay<BinaryColor>, config: &Config) -> usize {
            let r = config.display.moon_radius as i32;
            let center = Point::new(MARGIN + r, config.display.height / 2);
            let mut lit = 0;
            for dy in -(r - 2)..=(r - 2) {
                for dx in -(r - 2)..=(r - 2) {
                    if display.get_pixel(center + Point::new(dx, dy)) == Some(BinaryColor::On) {
                        lit += 1;
                    }
                }
            }
            lit
        }

        #[test]
        fn test_eink_rendering() {
            let config = small_config();
            let state = config.engine().snapshot(45.0, 12.0, 10.0);
            let mut display = mock();

            draw_eink(&state, &config, &mut display);

            assert!(lit_in_disk(&display, &config) > 0, "No lit pixels were drawn");
        }

        #[test]
        fn test_eink_full_brighter_than_new() {
            let mut config = small_config();
            config.display.include_side_view = false;
            let engine = config.engine();

            let mut full = mock();
            draw_eink(&engine.snapshot(90.0, 12.0, 10.0), &config, &mut full);
            let mut new = mock();
            draw_eink(&engine.snapshot(270.0, 12.0, 10.0), &config, &mut new);

            assert!(lit_in_disk(&full, &config) > lit_in_disk(&new, &config) + 100);
        }

        #[test]
        fn test_eink_eclipse_state() {
            let config = small_config();
            let state = config.engine().snapshot(80.0, 12.0, 10.0);
            let mut display = mock();

            // Should still render without panicking
            draw_eink(&state, &config, &mut display);
            assert!(display.affected_area().size.width > 0);
        }
    }
}
