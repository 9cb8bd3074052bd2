#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Garden Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Garden Snake.";

/// Number of segments a freshly started snake occupies.
pub const INITIAL_SNAKE_LENGTH: usize = 5;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Configures the world's playing field using the provided dimensions.
    ConfigureGrid {
        /// Geometry of the board measured in whole cells.
        grid: GridSpec,
    },
    /// Installs the high score read from the persistent store at startup.
    SeedHighScore {
        /// Highest score recorded by any previous session.
        value: u32,
    },
    /// Begins a fresh session from the ready state.
    Start {
        /// Seed for the food-placement random stream.
        food_seed: u64,
    },
    /// Reinitializes and resumes play after a game over.
    Restart {
        /// Seed for the food-placement random stream.
        food_seed: u64,
    },
    /// Suspends or resumes tick delivery for a running session.
    TogglePause,
    /// Records the most recent direction requested by the input source.
    RequestDirection {
        /// Direction the player asked the snake to travel.
        direction: Direction,
    },
    /// Selects the speed level that governs the tick cadence.
    SetSpeed {
        /// Requested speed level.
        level: SpeedLevel,
    },
    /// Advances the simulation by exactly one discrete tick.
    Step,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the session entered a new lifecycle state.
    SessionChanged {
        /// State that became active after processing commands.
        state: SessionState,
    },
    /// Confirms that the snake advanced one cell without eating.
    SnakeAdvanced {
        /// Cell the head occupies after the move.
        head: Cell,
        /// Direction the snake travelled this tick.
        direction: Direction,
    },
    /// Confirms that the snake's head landed on the food cell.
    FoodEaten {
        /// Cell where the food was consumed.
        cell: Cell,
        /// Score after the food was counted.
        score: u32,
    },
    /// Announces the location chosen for a fresh piece of food.
    FoodPlaced {
        /// Cell the food now occupies.
        cell: Cell,
    },
    /// Reports the session score after it changed.
    ScoreChanged {
        /// Score now held by the running session.
        score: u32,
    },
    /// Reports that the session score exceeded the persisted record.
    HighScoreChanged {
        /// New record value that should be persisted.
        value: u32,
    },
    /// Announces that a fatal collision ended the session.
    GameEnded {
        /// Score held when the collision occurred.
        final_score: u32,
    },
    /// Confirms that a new speed level was stored.
    SpeedChanged {
        /// Level now governing the tick cadence.
        level: SpeedLevel,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that a candidate head position one step beyond
/// the board edge remains representable for collision classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    column: i32,
    row: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the neighbouring cell one step in the provided direction.
    #[must_use]
    pub const fn offset_by(self, direction: Direction) -> Self {
        let (dx, dy) = direction.step();
        Self {
            column: self.column + dx,
            row: self.row + dy,
        }
    }
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Returns the direction pointing exactly opposite to this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step expressed as `(column delta, row delta)`.
    #[must_use]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Describes the discrete cell layout of the playing field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    columns: u32,
    rows: u32,
    cell_length: f32,
}

impl GridSpec {
    /// Creates a new grid description from explicit cell counts.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, cell_length: f32) -> Self {
        Self {
            columns,
            rows,
            cell_length,
        }
    }

    /// Derives the grid from a drawing surface, flooring to whole cells.
    #[must_use]
    pub fn from_surface(surface_width: f32, surface_height: f32, cell_length: f32) -> Self {
        let columns = if cell_length > 0.0 {
            (surface_width / cell_length).floor().max(0.0) as u32
        } else {
            0
        };
        let rows = if cell_length > 0.0 {
            (surface_height / cell_length).floor().max(0.0) as u32
        } else {
            0
        };
        Self {
            columns,
            rows,
            cell_length,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell expressed in pixels.
    #[must_use]
    pub const fn cell_length(&self) -> f32 {
        self.cell_length
    }

    /// Total width of the grid measured in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Total height of the grid measured in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Reports whether the cell lies inside the playing field.
    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.column() >= 0
            && cell.row() >= 0
            && (cell.column() as u32) < self.columns
            && (cell.row() as u32) < self.rows
    }

    /// Cell closest to the centre of the board.
    #[must_use]
    pub fn center(&self) -> Cell {
        Cell::new((self.columns / 2) as i32, (self.rows / 2) as i32)
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Speed level selected by the player, bounded to the legal range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    /// Slowest legal speed level.
    pub const MIN: u8 = 1;
    /// Fastest legal speed level.
    pub const MAX: u8 = 20;

    /// Creates a speed level, rejecting values outside the legal range.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN && level <= Self::MAX {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Retrieves the numeric level.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Interval between ticks at this speed: one second divided by the level.
    #[must_use]
    pub const fn tick_period(&self) -> Duration {
        Duration::from_millis(1000 / self.0 as u64)
    }

    /// Returns the level one step faster, saturating at the maximum.
    #[must_use]
    pub const fn faster(self) -> Self {
        if self.0 >= Self::MAX {
            self
        } else {
            Self(self.0 + 1)
        }
    }

    /// Returns the level one step slower, saturating at the minimum.
    #[must_use]
    pub const fn slower(self) -> Self {
        if self.0 <= Self::MIN {
            self
        } else {
            Self(self.0 - 1)
        }
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self(5)
    }
}

/// Lifecycle state of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Created but not yet started; the board shows the initial layout.
    Ready,
    /// Ticks are being delivered and the snake is in motion.
    Running,
    /// Tick delivery is suspended; state is frozen until resumed.
    Paused,
    /// A fatal collision occurred; only a restart leaves this state.
    GameOver,
}

/// Immutable per-tick snapshot consumed by the rendering boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Cells occupied by the snake, head first.
    pub snake: Vec<Cell>,
    /// Direction the head is currently facing.
    pub head_direction: Direction,
    /// Cell occupied by the food, absent only when the board is full.
    pub food: Option<Cell>,
    /// Score held by the current session.
    pub score: u32,
    /// Highest score recorded across sessions.
    pub high_score: u32,
    /// Speed level governing the tick cadence.
    pub speed: SpeedLevel,
    /// Lifecycle state of the session.
    pub session: SessionState,
}
