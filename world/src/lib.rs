#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game-state management for Garden Snake.
//!
//! The [`World`] owns every mutable piece of the simulation: the snake, the
//! food, the score, the session lifecycle, and the pending input flags. All
//! mutation flows through [`apply`], which executes one [`Command`] and
//! broadcasts the resulting [`Event`]s. Rendering and audio never reach into
//! the world; they consume snapshots captured through [`query`].

use std::collections::VecDeque;

use garden_snake_core::{
    Cell, Command, Direction, Event, GridSpec, SessionState, SpeedLevel, INITIAL_SNAKE_LENGTH,
    WELCOME_BANNER,
};
use rand::Rng;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

const DEFAULT_GRID: GridSpec = GridSpec::new(20, 20, 20.0);
const STARTING_DIRECTION: Direction = Direction::Right;

/// Ordered sequence of occupied cells, head first.
///
/// The snake is owned exclusively by the [`World`]; the only mutation path is
/// the step function inside [`apply`], which either prepends a head and drops
/// the tail (a normal move) or prepends without dropping (growth).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: VecDeque<Cell>,
}

impl Snake {
    fn starting_on(grid: &GridSpec) -> Self {
        let head = grid.center();
        let length = INITIAL_SNAKE_LENGTH.min(head.column() as usize + 1).max(1);
        let mut segments = VecDeque::with_capacity(length);
        for offset in 0..length {
            segments.push_back(Cell::new(head.column() - offset as i32, head.row()));
        }
        Self { segments }
    }

    /// Cell occupied by the head.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self.segments.front().expect("snake is never empty")
    }

    /// Reports whether any segment occupies the provided cell.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Number of cells occupied by the snake.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Reports whether the snake has no segments. Never true while alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterator over the occupied cells, head first.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().copied()
    }

    fn advance(&mut self, new_head: Cell, grew: bool) {
        self.segments.push_front(new_head);
        if !grew {
            let _ = self.segments.pop_back();
        }
    }
}

/// Classification of a candidate head position against the pre-move snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Impact {
    /// The candidate cell is free and inside the board.
    Safe,
    /// The candidate cell lies outside the playing field.
    WallHit,
    /// The candidate cell is occupied by the snake's own body.
    SelfHit,
}

/// Classifies a candidate head position without mutating anything.
///
/// The self test runs against the full pre-move body, including the tail cell
/// that a non-growth move is about to vacate. A snake therefore can never move
/// into the cell its own tail currently occupies, even though that cell frees
/// up on the same tick.
#[must_use]
pub fn classify(candidate: Cell, snake: &Snake, grid: &GridSpec) -> Impact {
    if !grid.in_bounds(candidate) {
        Impact::WallHit
    } else if snake.occupies(candidate) {
        Impact::SelfHit
    } else {
        Impact::Safe
    }
}

/// Represents the authoritative Garden Snake world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: GridSpec,
    snake: Snake,
    food: Option<Cell>,
    active_direction: Direction,
    pending_direction: Direction,
    score: u32,
    high_score: u32,
    speed: SpeedLevel,
    session: SessionState,
    food_rng: ChaCha8Rng,
}

impl World {
    /// Creates a new world showing the initial board layout in the ready state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: DEFAULT_GRID,
            snake: Snake::starting_on(&DEFAULT_GRID),
            food: None,
            active_direction: STARTING_DIRECTION,
            pending_direction: STARTING_DIRECTION,
            score: 0,
            high_score: 0,
            speed: SpeedLevel::default(),
            session: SessionState::Ready,
            food_rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    fn begin_session(&mut self, food_seed: u64, out_events: &mut Vec<Event>) {
        self.snake = Snake::starting_on(&self.grid);
        self.active_direction = STARTING_DIRECTION;
        self.pending_direction = STARTING_DIRECTION;
        self.score = 0;
        self.food_rng = ChaCha8Rng::seed_from_u64(food_seed);
        self.session = SessionState::Running;
        out_events.push(Event::SessionChanged {
            state: SessionState::Running,
        });
        out_events.push(Event::ScoreChanged { score: 0 });
        self.relocate_food(out_events);
    }

    fn relocate_food(&mut self, out_events: &mut Vec<Event>) {
        self.food = place_food(&self.snake, &self.grid, &mut self.food_rng);
        if let Some(cell) = self.food {
            out_events.push(Event::FoodPlaced { cell });
        }
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        let requested = self.pending_direction;
        if requested != self.active_direction.opposite() {
            self.active_direction = requested;
        }

        let candidate = self.snake.head().offset_by(self.active_direction);
        match classify(candidate, &self.snake, &self.grid) {
            Impact::WallHit | Impact::SelfHit => {
                self.session = SessionState::GameOver;
                out_events.push(Event::GameEnded {
                    final_score: self.score,
                });
                out_events.push(Event::SessionChanged {
                    state: SessionState::GameOver,
                });
            }
            Impact::Safe => {
                let grew = Some(candidate) == self.food;
                self.snake.advance(candidate, grew);
                if grew {
                    self.score += 1;
                    out_events.push(Event::ScoreChanged { score: self.score });
                    if self.score > self.high_score {
                        self.high_score = self.score;
                        out_events.push(Event::HighScoreChanged {
                            value: self.high_score,
                        });
                    }
                    out_events.push(Event::FoodEaten {
                        cell: candidate,
                        score: self.score,
                    });
                    self.relocate_food(out_events);
                } else {
                    out_events.push(Event::SnakeAdvanced {
                        head: candidate,
                        direction: self.active_direction,
                    });
                }
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands outside the legal state-machine transition set are silent no-ops;
/// there is no recoverable error surface in normal play.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { grid } => {
            world.grid = grid;
            world.snake = Snake::starting_on(&grid);
            world.food = None;
            world.active_direction = STARTING_DIRECTION;
            world.pending_direction = STARTING_DIRECTION;
            world.score = 0;
            world.session = SessionState::Ready;
            out_events.push(Event::SessionChanged {
                state: SessionState::Ready,
            });
        }
        Command::SeedHighScore { value } => {
            if world.session == SessionState::Ready {
                world.high_score = value;
            }
        }
        Command::Start { food_seed } => {
            if world.session == SessionState::Ready {
                world.begin_session(food_seed, out_events);
            }
        }
        Command::Restart { food_seed } => {
            if world.session == SessionState::GameOver {
                world.begin_session(food_seed, out_events);
            }
        }
        Command::TogglePause => match world.session {
            SessionState::Running => {
                world.session = SessionState::Paused;
                out_events.push(Event::SessionChanged {
                    state: SessionState::Paused,
                });
            }
            SessionState::Paused => {
                world.session = SessionState::Running;
                out_events.push(Event::SessionChanged {
                    state: SessionState::Running,
                });
            }
            SessionState::Ready | SessionState::GameOver => {}
        },
        Command::RequestDirection { direction } => {
            if world.session != SessionState::GameOver {
                world.pending_direction = direction;
            }
        }
        Command::SetSpeed { level } => {
            world.speed = level;
            out_events.push(Event::SpeedChanged { level });
        }
        Command::Step => {
            if world.session == SessionState::Running {
                world.step(out_events);
            }
        }
    }
}

fn place_food(snake: &Snake, grid: &GridSpec, rng: &mut ChaCha8Rng) -> Option<Cell> {
    let mut free: Vec<Cell> = Vec::with_capacity(grid.cell_count());
    for row in 0..grid.rows() as i32 {
        for column in 0..grid.columns() as i32 {
            let cell = Cell::new(column, row);
            if !snake.occupies(cell) {
                free.push(cell);
            }
        }
    }

    if free.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..free.len());
    Some(free[index])
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use garden_snake_core::{GameSnapshot, GridSpec, SessionState, SpeedLevel};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the configured grid geometry.
    #[must_use]
    pub fn grid(world: &World) -> &GridSpec {
        &world.grid
    }

    /// Lifecycle state of the current session.
    #[must_use]
    pub fn session(world: &World) -> SessionState {
        world.session
    }

    /// Score held by the current session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Highest score recorded across sessions.
    #[must_use]
    pub fn high_score(world: &World) -> u32 {
        world.high_score
    }

    /// Speed level most recently stored by the world.
    #[must_use]
    pub fn speed(world: &World) -> SpeedLevel {
        world.speed
    }

    /// Captures the immutable per-tick snapshot consumed by renderers.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        GameSnapshot {
            snake: world.snake.cells().collect(),
            head_direction: world.active_direction,
            food: world.food,
            score: world.score,
            high_score: world.high_score,
            speed: world.speed,
            session: world.session,
        }
    }
}
