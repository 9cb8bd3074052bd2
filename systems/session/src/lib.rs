#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session bookkeeping that bridges the world and the high-score store.
//!
//! The ledger reads the persisted record once at startup, turning it into a
//! [`Command::SeedHighScore`] for the world, and writes it back whenever the
//! world announces a new record. Store failures never interrupt gameplay: a
//! failed read seeds zero and a failed write is merely counted.

use std::cell::RefCell;

use garden_snake_core::{Command, Event};
use thiserror::Error;

/// Failure reported by a high-score store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persisted value could not be read.
    #[error("failed to read the persisted high score: {0}")]
    Read(String),
    /// The new record could not be written.
    #[error("failed to persist the high score: {0}")]
    Write(String),
}

/// Persistent key-value boundary holding the single high-score scalar.
pub trait HighScoreStore {
    /// Reads the persisted record; `None` on first run.
    fn load(&self) -> Result<Option<u32>, StoreError>;

    /// Persists a new record.
    fn save(&self, value: u32) -> Result<(), StoreError>;
}

/// Tracks the session record and mirrors it into the persistent store.
#[derive(Debug, Default)]
pub struct ScoreLedger {
    last_persisted: Option<u32>,
    failed_writes: u32,
}

impl ScoreLedger {
    /// Creates a ledger with no persisted record observed yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the store once and produces the world seeding command.
    ///
    /// A read failure degrades to a zero seed so gameplay can begin.
    pub fn startup<S: HighScoreStore>(&mut self, store: &S) -> Command {
        let value = store.load().unwrap_or(None).unwrap_or(0);
        self.last_persisted = Some(value);
        Command::SeedHighScore { value }
    }

    /// Consumes world events, persisting newly announced records.
    ///
    /// Writes are fire-and-forget: a failing store increments a counter and
    /// play continues.
    pub fn handle<S: HighScoreStore>(&mut self, events: &[Event], store: &S) {
        for event in events {
            if let Event::HighScoreChanged { value } = event {
                if self.last_persisted.is_some_and(|seen| seen >= *value) {
                    continue;
                }
                match store.save(*value) {
                    Ok(()) => self.last_persisted = Some(*value),
                    Err(_) => self.failed_writes += 1,
                }
            }
        }
    }

    /// Number of record writes the store rejected.
    #[must_use]
    pub const fn failed_writes(&self) -> u32 {
        self.failed_writes
    }
}

/// In-memory store used by tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<u32>>,
}

impl MemoryStore {
    /// Creates an empty store, mimicking a first run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding an existing record.
    #[must_use]
    pub fn with_record(value: u32) -> Self {
        Self {
            value: RefCell::new(Some(value)),
        }
    }

    /// Record currently held by the store.
    #[must_use]
    pub fn record(&self) -> Option<u32> {
        *self.value.borrow()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(*self.value.borrow())
    }

    fn save(&self, value: u32) -> Result<(), StoreError> {
        *self.value.borrow_mut() = Some(value);
        Ok(())
    }
}
