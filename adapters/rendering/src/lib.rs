#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Garden Snake adapters.
//!
//! Backends consume an immutable [`Scene`] once per frame and report player
//! intent back through [`FrameInput`]. Nothing in this crate mutates the
//! simulation; pixel geometry lives here so the world can stay in cell space.

use anyhow::Result;
use garden_snake_core::{Cell, Direction, GameSnapshot, GridSpec, SessionState, SpeedLevel};
use garden_snake_system_audio::AudioCue;
use glam::Vec2;
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            red: self.red,
            green: self.green,
            blue: self.blue,
            alpha,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Palette applied when painting the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Fill behind the playing field.
    pub background: Color,
    /// Faint lines separating cells.
    pub grid_line: Color,
    /// Fill of the head segment.
    pub snake_head: Color,
    /// Fill of the body segments.
    pub snake_body: Color,
    /// Outline shared by all segments.
    pub snake_border: Color,
    /// Fill of the food disc.
    pub food_fill: Color,
    /// Outline of the food disc.
    pub food_border: Color,
    /// Whites of the snake's eyes.
    pub eye: Color,
    /// Pupils of the snake's eyes.
    pub pupil: Color,
    /// HUD text for score and speed readouts.
    pub hud_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(0xe8, 0xf5, 0xe9),
            grid_line: Color::from_rgb_u8(0x00, 0x00, 0x00).with_alpha(0.05),
            snake_head: Color::from_rgb_u8(0x38, 0x8e, 0x3c),
            snake_body: Color::from_rgb_u8(0x4c, 0xaf, 0x50),
            snake_border: Color::from_rgb_u8(0x2e, 0x7d, 0x32),
            food_fill: Color::from_rgb_u8(0xf4, 0x43, 0x36),
            food_border: Color::from_rgb_u8(0xd3, 0x2f, 0x2f),
            eye: Color::from_rgb_u8(0xff, 0xff, 0xff),
            pupil: Color::from_rgb_u8(0x00, 0x00, 0x00),
            hud_text: Color::from_rgb_u8(0x1b, 0x5e, 0x20),
        }
    }
}

/// Pixel-space view of the cell grid.
///
/// All engine logic runs in cell coordinates; this wrapper owns the single
/// conversion into pixels that backends need when painting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    grid: GridSpec,
}

impl GridPresentation {
    /// Creates a presentation over the provided grid geometry.
    #[must_use]
    pub const fn new(grid: GridSpec) -> Self {
        Self { grid }
    }

    /// Underlying grid geometry.
    #[must_use]
    pub const fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Top-left pixel of the provided cell.
    #[must_use]
    pub fn cell_to_pixel(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            cell.column() as f32 * self.grid.cell_length(),
            cell.row() as f32 * self.grid.cell_length(),
        )
    }

    /// Centre pixel of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        let half = self.grid.cell_length() / 2.0;
        self.cell_to_pixel(cell) + Vec2::splat(half)
    }

    /// Pixel width of the playing field.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.grid.width()
    }

    /// Pixel height of the playing field.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.grid.height()
    }

    /// X coordinates of the vertical grid lines, left edge included.
    pub fn vertical_lines(&self) -> impl Iterator<Item = f32> + '_ {
        (0..=self.grid.columns()).map(|column| column as f32 * self.grid.cell_length())
    }

    /// Y coordinates of the horizontal grid lines, top edge included.
    pub fn horizontal_lines(&self) -> impl Iterator<Item = f32> + '_ {
        (0..=self.grid.rows()).map(|row| row as f32 * self.grid.cell_length())
    }
}

/// Immutable frame description handed to the backend for painting.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Simulation snapshot captured after the latest tick.
    pub snapshot: GameSnapshot,
    /// Pixel geometry of the board.
    pub grid: GridPresentation,
    /// Cues sampled from this frame's events; consumed fire-and-forget.
    pub cues: Vec<AudioCue>,
}

impl Scene {
    /// Creates a scene over the provided snapshot.
    #[must_use]
    pub fn new(snapshot: GameSnapshot, grid: GridPresentation) -> Self {
        Self {
            snapshot,
            grid,
            cues: Vec::new(),
        }
    }

    /// Session state captured in the snapshot.
    #[must_use]
    pub fn session(&self) -> SessionState {
        self.snapshot.session
    }

    /// Direction the head is facing, for eye placement.
    #[must_use]
    pub fn head_direction(&self) -> Direction {
        self.snapshot.head_direction
    }
}

/// Input snapshot gathered by backends before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Most recent direction the player asked for this frame, if any.
    pub requested_direction: Option<Direction>,
    /// Whether the player toggled pause this frame.
    pub toggle_pause: bool,
    /// Whether the player asked to start a session from the ready state.
    pub start: bool,
    /// Whether the player asked to restart after a game over.
    pub restart: bool,
    /// Speed adjustment requested this frame: -1, 0, or +1 levels.
    pub speed_delta: i8,
    /// Whether the player asked to leave the game.
    pub quit: bool,
}

impl FrameInput {
    /// Applies the speed delta to a level, saturating at the bounds.
    #[must_use]
    pub fn adjusted_speed(&self, current: SpeedLevel) -> SpeedLevel {
        match self.speed_delta {
            delta if delta > 0 => current.faster(),
            delta if delta < 0 => current.slower(),
            _ => current,
        }
    }
}

/// Top-level description a backend needs before opening its window.
#[derive(Clone, Debug)]
pub struct Presentation {
    /// Title for the backend's window.
    pub window_title: String,
    /// Palette applied to every frame.
    pub theme: Theme,
    /// Scene rendered on the first frame.
    pub scene: Scene,
}

/// Rendering backends drive the frame loop and surface player input.
pub trait RenderingBackend {
    /// Runs the frame loop until the player quits or the update closure stops.
    ///
    /// `update_scene` is invoked once per frame with the elapsed duration and
    /// the gathered input; it advances the simulation and rewrites the scene
    /// in place.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_moves_channels_toward_white() {
        let color = Color::from_rgb_u8(0x40, 0x80, 0xc0).lighten(0.5);
        assert!(color.red > 0x40 as f32 / 255.0);
        assert!(color.green > 0x80 as f32 / 255.0);
        assert!(color.blue > 0xc0 as f32 / 255.0);
        assert!((color.alpha - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn lighten_clamps_the_amount() {
        let color = Color::from_rgb_u8(10, 20, 30).lighten(5.0);
        assert!((color.red - 1.0).abs() < f32::EPSILON);
        assert!((color.green - 1.0).abs() < f32::EPSILON);
        assert!((color.blue - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn cell_to_pixel_scales_by_cell_length() {
        let presentation = GridPresentation::new(GridSpec::new(20, 20, 20.0));
        assert_eq!(
            presentation.cell_to_pixel(Cell::new(3, 2)),
            Vec2::new(60.0, 40.0)
        );
        assert_eq!(
            presentation.cell_center(Cell::new(0, 0)),
            Vec2::new(10.0, 10.0)
        );
    }

    #[test]
    fn grid_lines_span_both_edges() {
        let presentation = GridPresentation::new(GridSpec::new(4, 3, 10.0));
        let vertical: Vec<f32> = presentation.vertical_lines().collect();
        assert_eq!(vertical, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        let horizontal: Vec<f32> = presentation.horizontal_lines().collect();
        assert_eq!(horizontal, vec![0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn speed_delta_saturates_through_adjusted_speed() {
        let max = SpeedLevel::new(SpeedLevel::MAX).expect("legal level");
        let up = FrameInput {
            speed_delta: 1,
            ..FrameInput::default()
        };
        assert_eq!(up.adjusted_speed(max), max);

        let down = FrameInput {
            speed_delta: -1,
            ..FrameInput::default()
        };
        assert_eq!(down.adjusted_speed(max).get(), SpeedLevel::MAX - 1);
    }
}
