#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Garden Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature; the cues sampled by the audio system are drained
//! from the scene each frame so a sound-capable backend can pick them up.

mod theme;

pub use self::theme::load_theme;

use garden_snake_core::{Cell, Direction, SessionState};
use garden_snake_rendering::{
    Color, FrameInput, GridPresentation, Presentation, RenderingBackend, Scene, Theme,
};
use macroquad::input::{is_key_pressed, KeyCode};
use std::time::Duration;

const HUD_HEIGHT: f32 = 48.0;
const SEGMENT_BORDER_THICKNESS: f32 = 2.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend;

impl MacroquadBackend {
    /// Creates a backend with default window settings.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Snapshot of edge-triggered keys observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardState {
    direction: Option<Direction>,
    toggle_pause: bool,
    confirm: bool,
    speed_up: bool,
    speed_down: bool,
    quit_requested: bool,
}

impl KeyboardState {
    fn poll() -> Self {
        // Last-write-wins: when several direction keys land on one frame the
        // latest in polling order stands in for the most recent press.
        let mut direction = None;
        if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
            direction = Some(Direction::Up);
        }
        if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
            direction = Some(Direction::Down);
        }
        if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
            direction = Some(Direction::Left);
        }
        if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
            direction = Some(Direction::Right);
        }

        Self {
            direction,
            toggle_pause: is_key_pressed(KeyCode::Space),
            confirm: is_key_pressed(KeyCode::Enter),
            speed_up: is_key_pressed(KeyCode::Equal),
            speed_down: is_key_pressed(KeyCode::Minus),
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }
}

fn gather_frame_input(session: SessionState, keyboard: KeyboardState) -> FrameInput {
    let mut speed_delta = 0i8;
    if keyboard.speed_up {
        speed_delta += 1;
    }
    if keyboard.speed_down {
        speed_delta -= 1;
    }

    FrameInput {
        requested_direction: keyboard.direction,
        toggle_pause: keyboard.toggle_pause,
        start: keyboard.confirm && session == SessionState::Ready,
        restart: keyboard.confirm && session == SessionState::GameOver,
        speed_delta,
        quit: keyboard.quit_requested,
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> anyhow::Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            theme,
            scene,
        } = presentation;

        let config = macroquad::window::Conf {
            window_title,
            window_width: scene.grid.width() as i32,
            window_height: (scene.grid.height() + HUD_HEIGHT) as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;

            loop {
                let keyboard = KeyboardState::poll();
                let frame_input = gather_frame_input(scene.session(), keyboard);
                if frame_input.quit {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                update_scene(frame_dt, frame_input, &mut scene);

                // No speaker without the audio feature; drain the cues so the
                // scene never accumulates stale notifications.
                scene.cues.clear();

                macroquad::window::clear_background(to_macroquad_color(theme.background));
                draw_grid_lines(&scene.grid, &theme);
                draw_food(&scene, &theme);
                draw_snake(&scene, &theme);
                draw_hud(&scene, &theme);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

fn draw_grid_lines(grid: &GridPresentation, theme: &Theme) {
    let color = to_macroquad_color(theme.grid_line);
    let height = grid.height();
    for x in grid.vertical_lines() {
        macroquad::shapes::draw_line(x, 0.0, x, height, 1.0, color);
    }
    let width = grid.width();
    for y in grid.horizontal_lines() {
        macroquad::shapes::draw_line(0.0, y, width, y, 1.0, color);
    }
}

fn draw_food(scene: &Scene, theme: &Theme) {
    let Some(cell) = scene.snapshot.food else {
        return;
    };

    let center = scene.grid.cell_center(cell);
    let radius = scene.grid.grid().cell_length() / 2.0;
    macroquad::shapes::draw_circle(
        center.x,
        center.y,
        radius - 2.0,
        to_macroquad_color(theme.food_fill),
    );
    macroquad::shapes::draw_circle_lines(
        center.x,
        center.y,
        radius - 2.0,
        SEGMENT_BORDER_THICKNESS,
        to_macroquad_color(theme.food_border),
    );

    // Small highlight towards the upper-left, as in the canvas original.
    macroquad::shapes::draw_circle(
        center.x - radius / 3.0,
        center.y - radius / 3.0,
        radius / 3.0,
        macroquad::color::Color::new(1.0, 1.0, 1.0, 0.3),
    );
}

fn draw_snake(scene: &Scene, theme: &Theme) {
    let cell_length = scene.grid.grid().cell_length();
    let border = to_macroquad_color(theme.snake_border);

    for (index, cell) in scene.snapshot.snake.iter().enumerate() {
        let origin = scene.grid.cell_to_pixel(*cell);
        let fill = if index == 0 {
            theme.snake_head
        } else {
            theme.snake_body
        };
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            cell_length,
            cell_length,
            to_macroquad_color(fill),
        );
        macroquad::shapes::draw_rectangle_lines(
            origin.x,
            origin.y,
            cell_length,
            cell_length,
            SEGMENT_BORDER_THICKNESS,
            border,
        );
    }

    if let Some(head) = scene.snapshot.snake.first() {
        draw_eyes(scene, theme, *head);
    }
}

/// Eye and pupil placement scaled from the original 20px sprite ratios.
fn draw_eyes(scene: &Scene, theme: &Theme, head: Cell) {
    let origin = scene.grid.cell_to_pixel(head);
    let cell = scene.grid.grid().cell_length();
    let eye = cell * 0.2;
    let pupil = cell * 0.1;
    let near = cell * 0.25;
    let far = cell - near - eye;

    let (first, second) = match scene.head_direction() {
        Direction::Right => ((cell - eye * 2.0, near), (cell - eye * 2.0, far)),
        Direction::Left => ((eye, near), (eye, far)),
        Direction::Up => ((near, eye), (far, eye)),
        Direction::Down => ((near, cell - eye * 2.0), (far, cell - eye * 2.0)),
    };

    let eye_color = to_macroquad_color(theme.eye);
    let pupil_color = to_macroquad_color(theme.pupil);
    for (dx, dy) in [first, second] {
        macroquad::shapes::draw_rectangle(origin.x + dx, origin.y + dy, eye, eye, eye_color);
        let inset = (eye - pupil) / 2.0;
        macroquad::shapes::draw_rectangle(
            origin.x + dx + inset,
            origin.y + dy + inset,
            pupil,
            pupil,
            pupil_color,
        );
    }
}

fn draw_hud(scene: &Scene, theme: &Theme) {
    let snapshot = &scene.snapshot;
    let baseline = scene.grid.height() + HUD_HEIGHT * 0.6;
    let text = format!(
        "Score: {}   Best: {}   Speed: {}",
        snapshot.score,
        snapshot.high_score,
        snapshot.speed.get(),
    );
    macroquad::text::draw_text(&text, 8.0, baseline, 24.0, to_macroquad_color(theme.hud_text));

    let status = match snapshot.session {
        SessionState::Ready => Some("Press Enter to start"),
        SessionState::Paused => Some("Paused - Space resumes"),
        SessionState::GameOver => Some("Game over - Enter restarts"),
        SessionState::Running => None,
    };
    if let Some(status) = status {
        let y = scene.grid.height() / 2.0;
        macroquad::text::draw_text(
            status,
            scene.grid.width() * 0.18,
            y,
            32.0,
            to_macroquad_color(theme.snake_border),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_maps_to_start_or_restart_by_session() {
        let keyboard = KeyboardState {
            confirm: true,
            ..KeyboardState::default()
        };

        let ready = gather_frame_input(SessionState::Ready, keyboard);
        assert!(ready.start && !ready.restart);

        let over = gather_frame_input(SessionState::GameOver, keyboard);
        assert!(over.restart && !over.start);

        let running = gather_frame_input(SessionState::Running, keyboard);
        assert!(!running.start && !running.restart);
    }

    #[test]
    fn quit_keys_surface_through_the_frame_input() {
        let keyboard = KeyboardState {
            quit_requested: true,
            ..KeyboardState::default()
        };
        let input = gather_frame_input(SessionState::Running, keyboard);
        assert!(input.quit);
    }

    #[test]
    fn opposing_speed_keys_cancel_out() {
        let keyboard = KeyboardState {
            speed_up: true,
            speed_down: true,
            ..KeyboardState::default()
        };
        let input = gather_frame_input(SessionState::Running, keyboard);
        assert_eq!(input.speed_delta, 0);
    }
}
