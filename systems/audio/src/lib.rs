#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Maps world events to fire-and-forget audio cues.
//!
//! The sampler is the only component allowed to be noisy about movement: the
//! move cue plays on roughly one tick in five so the speaker is not hammered
//! at high speeds. The throttle draws from a private seeded RNG and has no
//! effect on game state, so simulation replays stay deterministic regardless
//! of what the speaker does.

use garden_snake_core::Event;
use rand::Rng;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

const MOVE_CUE_PROBABILITY: f64 = 0.2;

/// Fire-and-forget notification for an audio backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// The snake ate a piece of food.
    Eat,
    /// A fatal collision ended the session.
    GameOver,
    /// The snake advanced one cell.
    Move,
}

/// Samples audio cues from the event stream.
#[derive(Clone, Debug)]
pub struct CueSampler {
    rng: ChaCha8Rng,
}

impl CueSampler {
    /// Creates a sampler with its own throttling random stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Translates world events into cues, throttling the move cue.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<AudioCue>) {
        for event in events {
            match event {
                Event::FoodEaten { .. } => out.push(AudioCue::Eat),
                Event::GameEnded { .. } => out.push(AudioCue::GameOver),
                Event::SnakeAdvanced { .. } => {
                    if self.rng.gen_bool(MOVE_CUE_PROBABILITY) {
                        out.push(AudioCue::Move);
                    }
                }
                _ => {}
            }
        }
    }
}
