use std::time::Duration;

use garden_snake_core::{Command, Event, SessionState, SpeedLevel};
use garden_snake_system_timing::TickDriver;

fn level(value: u8) -> SpeedLevel {
    SpeedLevel::new(value).expect("legal speed level")
}

#[test]
fn emits_a_step_once_the_period_elapses() {
    let mut driver = TickDriver::new(level(5));
    let mut out = Vec::new();

    driver.handle(
        &[],
        SessionState::Running,
        Duration::from_millis(150),
        &mut out,
    );
    assert!(out.is_empty(), "period not yet elapsed");

    driver.handle(
        &[],
        SessionState::Running,
        Duration::from_millis(50),
        &mut out,
    );
    assert_eq!(out, vec![Command::Step]);
}

#[test]
fn constructed_level_governs_the_cadence_from_the_first_frame() {
    // No SpeedChanged event has been seen; the level passed at construction
    // must already set the period.
    let mut driver = TickDriver::new(level(20));
    let mut out = Vec::new();

    driver.handle(
        &[],
        SessionState::Running,
        Duration::from_millis(40),
        &mut out,
    );
    assert!(out.is_empty(), "50ms period at level 20 not yet elapsed");
    assert_eq!(driver.level(), level(20));

    driver.handle(
        &[],
        SessionState::Running,
        Duration::from_millis(10),
        &mut out,
    );
    assert_eq!(out, vec![Command::Step]);
}

#[test]
fn speed_change_while_running_restarts_the_period() {
    let mut driver = TickDriver::new(level(5));
    let mut out = Vec::new();

    driver.handle(
        &[],
        SessionState::Running,
        Duration::from_millis(190),
        &mut out,
    );
    assert!(out.is_empty());

    // The accrued 190ms phase is cancelled along with the old schedule.
    driver.handle(
        &[Event::SpeedChanged { level: level(10) }],
        SessionState::Running,
        Duration::from_millis(50),
        &mut out,
    );
    assert!(out.is_empty(), "fresh 100ms period starts from zero");

    driver.handle(
        &[],
        SessionState::Running,
        Duration::from_millis(50),
        &mut out,
    );
    assert_eq!(out, vec![Command::Step]);
}

#[test]
fn speed_change_while_paused_only_stores_the_level() {
    let mut driver = TickDriver::new(level(5));
    let mut out = Vec::new();

    driver.handle(
        &[Event::SpeedChanged { level: level(20) }],
        SessionState::Paused,
        Duration::from_secs(1),
        &mut out,
    );
    assert!(out.is_empty());
    assert_eq!(driver.level(), level(20));

    driver.handle(
        &[Event::SessionChanged {
            state: SessionState::Running,
        }],
        SessionState::Running,
        Duration::from_millis(50),
        &mut out,
    );
    assert_eq!(out, vec![Command::Step], "new level applies on resume");
}

#[test]
fn session_transition_cancels_the_outstanding_tick() {
    let mut driver = TickDriver::new(level(5));
    let mut out = Vec::new();

    driver.handle(
        &[],
        SessionState::Running,
        Duration::from_millis(190),
        &mut out,
    );
    assert!(out.is_empty());

    driver.handle(
        &[Event::SessionChanged {
            state: SessionState::GameOver,
        }],
        SessionState::GameOver,
        Duration::from_millis(50),
        &mut out,
    );
    assert!(out.is_empty(), "no tick fires after cancellation");

    driver.handle(
        &[],
        SessionState::GameOver,
        Duration::from_secs(10),
        &mut out,
    );
    assert!(out.is_empty());
}

#[test]
fn ticks_resume_from_a_fresh_phase_after_unpause() {
    let mut driver = TickDriver::new(level(10));
    let mut out = Vec::new();

    driver.handle(
        &[],
        SessionState::Running,
        Duration::from_millis(90),
        &mut out,
    );
    driver.handle(
        &[Event::SessionChanged {
            state: SessionState::Paused,
        }],
        SessionState::Paused,
        Duration::from_millis(90),
        &mut out,
    );
    driver.handle(
        &[Event::SessionChanged {
            state: SessionState::Running,
        }],
        SessionState::Running,
        Duration::from_millis(90),
        &mut out,
    );
    assert!(out.is_empty(), "pre-pause phase does not carry over");

    driver.handle(
        &[],
        SessionState::Running,
        Duration::from_millis(10),
        &mut out,
    );
    assert_eq!(out, vec![Command::Step]);
}
