#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic timing system that converts elapsed wall time into ticks.
//!
//! The driver models the source's cancellable interval timer as a phase
//! accumulator: while the session is running it accrues frame durations and
//! emits [`Command::Step`] once the period for the selected speed level has
//! elapsed. Session transitions and speed changes cancel the outstanding
//! scheduled tick by clearing the phase, so no tick can fire across a state
//! boundary and no period ever yields two ticks.

use std::time::Duration;

use garden_snake_core::{Command, Event, SessionState, SpeedLevel};

/// Pure system that emits at most one step command per elapsed tick period.
#[derive(Clone, Copy, Debug)]
pub struct TickDriver {
    level: SpeedLevel,
    phase: Duration,
}

impl TickDriver {
    /// Creates a new driver idling at the provided speed level.
    #[must_use]
    pub const fn new(level: SpeedLevel) -> Self {
        Self {
            level,
            phase: Duration::ZERO,
        }
    }

    /// Speed level currently governing the tick cadence.
    #[must_use]
    pub const fn level(&self) -> SpeedLevel {
        self.level
    }

    /// Consumes world events and elapsed time to emit step commands.
    ///
    /// A stall longer than one period still emits a single step; the surplus
    /// phase is discarded rather than burst-fired so the simulation never
    /// advances faster than the selected cadence.
    pub fn handle(
        &mut self,
        events: &[Event],
        session: SessionState,
        dt: Duration,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::SpeedChanged { level } => {
                    self.level = *level;
                    // Mirrors the source restarting its interval timer.
                    if session == SessionState::Running {
                        self.phase = Duration::ZERO;
                    }
                }
                Event::SessionChanged { .. } => {
                    self.phase = Duration::ZERO;
                }
                _ => {}
            }
        }

        if session != SessionState::Running {
            self.phase = Duration::ZERO;
            return;
        }

        self.phase = self.phase.saturating_add(dt);
        let period = self.level.tick_period();
        if self.phase >= period {
            self.phase = Duration::ZERO;
            out.push(Command::Step);
        }
    }
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(SpeedLevel::default())
    }
}
