//! Ong Jump headless runner
//!
//! Plays autopilot rounds against a fixed 60 Hz clock, drawing every frame
//! into a vertex batch, and keeps the best score on disk. Options can also
//! come from `ONG_JUMP_DIR`, `ONG_JUMP_ROUNDS` and `ONG_JUMP_SEED`; `RUST_LOG`
//! sets the log level.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use ong_jump::assets::AssetCatalog;
use ong_jump::audio::AudioManager;
use ong_jump::consts::{HIGHSCORE_FILE, SETTINGS_FILE, TICK_RATE, TUNING_FILE};
use ong_jump::persistence::FileScoreStore;
use ong_jump::platform::{FixedClock, InputEvent, TimeSource};
use ong_jump::renderer::VertexBatch;
use ong_jump::sim::{RoundPhase, autopilot};
use ong_jump::{Session, Settings, Tuning};

/// Give up on a round the autopilot survives this long (ticks)
const MAX_ROUND_TICKS: u64 = TICK_RATE as u64 * 180;

#[derive(Parser)]
#[command(name = "ong-jump")]
#[command(about = "Play Ong Jump rounds on autopilot and keep the best score")]
struct Args {
    /// Data directory (assets, settings, highscore)
    #[arg(long, env = "ONG_JUMP_DIR", default_value = ".")]
    dir: PathBuf,

    /// Rounds to play
    #[arg(long, env = "ONG_JUMP_ROUNDS", default_value_t = 3)]
    rounds: u64,

    /// Base seed (defaults to the system clock)
    #[arg(long, env = "ONG_JUMP_SEED")]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Ong Jump (headless) starting...");

    let root = args.dir;
    let rounds = args.rounds;
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let tuning = Tuning::load(&root.join(TUNING_FILE));
    let settings = Settings::load(&root.join(SETTINGS_FILE));
    let assets = AssetCatalog::load(&root.join("assets"));
    let audio = AudioManager::new(&root.join("assets"), &settings);
    let store = FileScoreStore::new(root.join(HIGHSCORE_FILE));

    let mut session = Session::new(tuning, settings, store, audio, seed)
        .with_settings_path(root.join(SETTINGS_FILE));
    session.use_assets(&assets);

    let mut clock = FixedClock::default();
    let mut batch = VertexBatch::new(session.simulation().tuning().ground_y);
    let mut time_ms = 0.0;

    for _ in 0..rounds {
        session.push_input(InputEvent::JumpRequested);
        loop {
            let dt = clock.elapsed_ms();
            time_ms += dt as f64;
            let out = session.tick(dt);
            session.present(&out.snapshot, &mut batch);
            session.record_frame(time_ms);

            if out.result.is_some() {
                break;
            }
            if out.snapshot.tick >= MAX_ROUND_TICKS {
                log::info!("Autopilot survived {} ticks, stopping round", out.snapshot.tick);
                session.push_input(InputEvent::PauseOrQuitRequested);
                session.tick(0.0);
                break;
            }
            if out.snapshot.phase == RoundPhase::Running
                && autopilot::wants_jump(&out.snapshot, session.simulation().tuning())
            {
                session.push_input(InputEvent::JumpRequested);
            }
        }
    }

    log::info!(
        "Played {} rounds over {} frames, best score {}",
        session.round(),
        batch.frames(),
        session.best()
    );
    println!("best: {}", session.best());
}
