#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Garden Snake experience.
//!
//! The binary wires the authoritative world to the timing, session, and audio
//! systems, then hands the frame loop to the macroquad backend. A headless
//! mode runs a scripted number of ticks without a window so the full stack
//! stays exercisable in CI.

mod store;

use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use garden_snake_core::{Command, Event, GridSpec, SpeedLevel};
use garden_snake_rendering::{
    FrameInput, GridPresentation, Presentation, RenderingBackend, Scene,
};
use garden_snake_rendering_macroquad::{load_theme, MacroquadBackend};
use garden_snake_system_audio::CueSampler;
use garden_snake_system_bootstrap::{startup_commands, BootConfig};
use garden_snake_system_session::ScoreLedger;
use garden_snake_system_timing::TickDriver;
use garden_snake_world::{self as world, query, World};
use store::FileHighScoreStore;

/// Classic grid snake with a persistent high score.
#[derive(Debug, Parser)]
#[command(name = "garden-snake", version, about)]
struct Args {
    /// Board width in cells.
    #[arg(long, default_value_t = 20)]
    columns: u32,

    /// Board height in cells.
    #[arg(long, default_value_t = 20)]
    rows: u32,

    /// Side length of one cell in pixels.
    #[arg(long, default_value_t = 20.0)]
    cell_length: f32,

    /// Initial speed level (1-20); ticks per second.
    #[arg(long, default_value_t = 5)]
    speed: u8,

    /// Fixed seed for food placement; omit for a fresh seed per session.
    #[arg(long)]
    seed: Option<u64>,

    /// File holding the persisted high score.
    #[arg(long, default_value = "high_score.txt")]
    high_score_file: PathBuf,

    /// Optional TOML palette override.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Run this many ticks without a window and print the outcome.
    #[arg(long)]
    headless_ticks: Option<u64>,
}

/// Entry point for the Garden Snake command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let speed = SpeedLevel::new(args.speed)
        .ok_or_else(|| anyhow!("speed must be between {} and {}", SpeedLevel::MIN, SpeedLevel::MAX))?;
    let grid = GridSpec::new(args.columns, args.rows, args.cell_length);
    if grid.cell_count() == 0 {
        return Err(anyhow!("the board needs at least one cell"));
    }

    let store = FileHighScoreStore::new(args.high_score_file.clone());
    let mut ledger = ScoreLedger::new();
    let mut world = World::new();
    let mut events = Vec::new();
    for command in startup_commands(&BootConfig::new(grid, speed)) {
        world::apply(&mut world, command, &mut events);
    }
    world::apply(&mut world, ledger.startup(&store), &mut events);

    println!("{}", query::welcome_banner(&world));

    match args.headless_ticks {
        Some(ticks) => run_headless(world, ledger, store, args.seed, ticks),
        None => run_windowed(world, ledger, store, speed, args.seed, args.theme),
    }
}

/// Owns the wired stack and advances it once per rendered frame.
struct Session {
    world: World,
    driver: TickDriver,
    ledger: ScoreLedger,
    sampler: CueSampler,
    store: FileHighScoreStore,
    fixed_seed: Option<u64>,
}

impl Session {
    fn food_seed(&self) -> u64 {
        self.fixed_seed.unwrap_or_else(rand::random)
    }

    fn frame(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        let mut events = Vec::new();

        if let Some(direction) = input.requested_direction {
            world::apply(
                &mut self.world,
                Command::RequestDirection { direction },
                &mut events,
            );
        }
        if input.toggle_pause {
            world::apply(&mut self.world, Command::TogglePause, &mut events);
        }
        if input.start {
            let food_seed = self.food_seed();
            world::apply(&mut self.world, Command::Start { food_seed }, &mut events);
        }
        if input.restart {
            let food_seed = self.food_seed();
            world::apply(&mut self.world, Command::Restart { food_seed }, &mut events);
        }
        if input.speed_delta != 0 {
            let current = query::speed(&self.world);
            let adjusted = input.adjusted_speed(current);
            if adjusted != current {
                world::apply(
                    &mut self.world,
                    Command::SetSpeed { level: adjusted },
                    &mut events,
                );
            }
        }

        let mut ticks = Vec::new();
        self.driver
            .handle(&events, query::session(&self.world), dt, &mut ticks);
        for command in ticks {
            world::apply(&mut self.world, command, &mut events);
        }

        self.ledger.handle(&events, &self.store);
        self.sampler.handle(&events, &mut scene.cues);
        scene.snapshot = query::snapshot(&self.world);
    }
}

fn run_windowed(
    world: World,
    ledger: ScoreLedger,
    store: FileHighScoreStore,
    speed: SpeedLevel,
    fixed_seed: Option<u64>,
    theme_path: Option<PathBuf>,
) -> Result<()> {
    let theme = match theme_path {
        Some(path) => load_theme(&path).context("failed to load the theme override")?,
        None => load_theme(&PathBuf::from("assets/theme.toml"))?,
    };

    let snapshot = query::snapshot(&world);
    let grid = GridPresentation::new(*query::grid(&world));
    let scene = Scene::new(snapshot, grid);
    let presentation = Presentation {
        window_title: String::from("Garden Snake"),
        theme,
        scene,
    };

    let mut session = Session {
        world,
        // The driver must agree with the world's speed from the first frame;
        // it only hears about later changes through SpeedChanged events.
        driver: TickDriver::new(speed),
        ledger,
        sampler: CueSampler::new(rand::random()),
        store,
        fixed_seed,
    };

    MacroquadBackend::new().run(presentation, move |dt, input, scene| {
        session.frame(dt, input, scene);
    })
}

fn run_headless(
    mut world: World,
    mut ledger: ScoreLedger,
    store: FileHighScoreStore,
    fixed_seed: Option<u64>,
    ticks: u64,
) -> Result<()> {
    let food_seed = fixed_seed.unwrap_or_else(rand::random);
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start { food_seed }, &mut events);

    for _ in 0..ticks {
        world::apply(&mut world, Command::Step, &mut events);
    }
    ledger.handle(&events, &store);

    let eaten = events
        .iter()
        .filter(|event| matches!(event, Event::FoodEaten { .. }))
        .count();
    let snapshot = query::snapshot(&world);
    let head: Option<(i32, i32)> = snapshot
        .snake
        .first()
        .map(|cell| (cell.column(), cell.row()));
    println!(
        "session={:?} score={} best={} length={} eaten={} head={:?}",
        snapshot.session,
        snapshot.score,
        snapshot.high_score,
        snapshot.snake.len(),
        eaten,
        head,
    );
    if ledger.failed_writes() > 0 {
        eprintln!(
            "warning: {} high-score write(s) failed; the record is not persisted",
            ledger.failed_writes(),
        );
    }
    Ok(())
}
