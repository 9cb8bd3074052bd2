#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Builds the command batch that brings a fresh world to the ready state.

use garden_snake_core::{Command, GridSpec, SpeedLevel};

/// Startup parameters gathered by the hosting adapter.
#[derive(Clone, Copy, Debug)]
pub struct BootConfig {
    grid: GridSpec,
    speed: SpeedLevel,
}

impl BootConfig {
    /// Creates a new boot configuration.
    #[must_use]
    pub const fn new(grid: GridSpec, speed: SpeedLevel) -> Self {
        Self { grid, speed }
    }

    /// Grid geometry the world should adopt.
    #[must_use]
    pub const fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Speed level active before the player adjusts it.
    #[must_use]
    pub const fn speed(&self) -> SpeedLevel {
        self.speed
    }
}

/// Produces the startup commands for the provided configuration.
///
/// The high-score seed is appended by the session ledger once the persistent
/// store has been consulted, so it is not part of this batch.
#[must_use]
pub fn startup_commands(config: &BootConfig) -> Vec<Command> {
    vec![
        Command::ConfigureGrid {
            grid: config.grid(),
        },
        Command::SetSpeed {
            level: config.speed(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_configures_grid_before_speed() {
        let grid = GridSpec::new(20, 20, 20.0);
        let speed = SpeedLevel::default();
        let commands = startup_commands(&BootConfig::new(grid, speed));
        assert_eq!(
            commands,
            vec![
                Command::ConfigureGrid { grid },
                Command::SetSpeed { level: speed },
            ]
        );
    }
}
