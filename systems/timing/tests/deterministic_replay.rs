use std::time::Duration;

use garden_snake_core::{Command, Direction, Event, SpeedLevel};
use garden_snake_system_timing::TickDriver;
use garden_snake_world::{self as world, query, World};

/// Replays a scripted session twice and asserts both runs agree exactly.
#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let first = replay(scripted_frames());
    let second = replay(scripted_frames());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(
        first.events.iter().any(|event| matches!(
            event,
            Event::SnakeAdvanced { .. } | Event::FoodEaten { .. }
        )),
        "the script is expected to drive the snake",
    );
}

/// One scripted frame: optional player command, then elapsed wall time.
struct Frame {
    input: Option<Command>,
    dt: Duration,
}

impl Frame {
    fn idle(dt: Duration) -> Self {
        Self { input: None, dt }
    }

    fn input(command: Command, dt: Duration) -> Self {
        Self {
            input: Some(command),
            dt,
        }
    }
}

fn scripted_frames() -> Vec<Frame> {
    let fast = SpeedLevel::new(10).expect("legal speed level");
    vec![
        Frame::input(Command::Start { food_seed: 0x5eed }, Duration::ZERO),
        Frame::idle(Duration::from_millis(200)),
        Frame::idle(Duration::from_millis(200)),
        Frame::input(
            Command::RequestDirection {
                direction: Direction::Up,
            },
            Duration::from_millis(200),
        ),
        Frame::input(Command::SetSpeed { level: fast }, Duration::from_millis(40)),
        Frame::idle(Duration::from_millis(100)),
        Frame::input(Command::TogglePause, Duration::from_millis(100)),
        Frame::idle(Duration::from_secs(1)),
        Frame::input(Command::TogglePause, Duration::from_millis(100)),
        Frame::idle(Duration::from_millis(100)),
        Frame::idle(Duration::from_millis(100)),
    ]
}

fn replay(frames: Vec<Frame>) -> ReplayOutcome {
    let mut world = World::new();
    let mut driver = TickDriver::default();
    let mut log = Vec::new();

    for frame in frames {
        let mut events = Vec::new();
        if let Some(command) = frame.input {
            world::apply(&mut world, command, &mut events);
        }

        let mut commands = Vec::new();
        driver.handle(&events, query::session(&world), frame.dt, &mut commands);
        log.extend(events);

        for command in commands {
            let mut generated = Vec::new();
            world::apply(&mut world, command, &mut generated);
            log.extend(generated);
        }
    }

    ReplayOutcome {
        snapshot: query::snapshot(&world),
        events: log,
    }
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    snapshot: garden_snake_core::GameSnapshot,
    events: Vec<Event>,
}
