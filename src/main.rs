//! Headless runner
//!
//! Starts a session and drives it with a simple autopilot, logging the HUD.
//!
//! Usage: wave-invaders [settings.json] [seconds]

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};

use wave_invaders::audio::LogAudio;
use wave_invaders::sim::{Command, GamePhase, Snapshot};
use wave_invaders::{JsonFileStore, Session, Settings};

const DEFAULT_RUN_SECS: u64 = 10;
const POLL: Duration = Duration::from_millis(50);
const HUD_EVERY: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => {
            let path = PathBuf::from(path);
            Settings::load(&path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Settings::default(),
    };
    let run_secs = match args.next() {
        Some(secs) => secs
            .parse::<u64>()
            .map_err(|e| anyhow!("invalid run length '{secs}': {e}"))?,
        None => DEFAULT_RUN_SECS,
    };

    let store = JsonFileStore::new(settings.high_score_path.clone());
    let mut session = Session::spawn(settings, Box::new(LogAudio), Box::new(store))
        .context("starting session")?;
    session.send(Command::Resume);

    let started = Instant::now();
    let mut last_hud = started;
    let mut last_move = Command::Stop;
    while started.elapsed() < Duration::from_secs(run_secs) {
        let snapshot = session.snapshot();
        if snapshot.phase == GamePhase::Paused {
            session.send(Command::Resume);
        }

        let steer = autopilot(&snapshot);
        if steer != last_move {
            session.send(steer);
            last_move = steer;
        }
        if !snapshot.player_bullet.shown {
            session.send(Command::Fire);
        }

        if last_hud.elapsed() >= HUD_EVERY {
            let hud = snapshot.hud;
            log::info!(
                "wave {} score {} lives {} high {} | {} enemies | {} fps",
                hud.wave,
                hud.score,
                hud.lives,
                hud.high_score,
                snapshot.enemies_shown(),
                hud.fps
            );
            last_hud = Instant::now();
        }
        thread::sleep(POLL);
    }

    let report = session.shutdown()?;
    log::info!(
        "Final score {} (high score {}) after {} ticks",
        report.final_score,
        report.high_score,
        report.ticks
    );
    Ok(())
}

/// Steer under the lowest visible enemy
fn autopilot(snapshot: &Snapshot) -> Command {
    let ship = snapshot.ship.rect.center();
    let target = snapshot
        .enemies
        .iter()
        .filter(|e| e.shown)
        .max_by(|a, b| a.rect.bottom.total_cmp(&b.rect.bottom));
    let Some(target) = target else {
        return Command::Stop;
    };

    let dx = target.rect.center().x - ship.x;
    let dead_zone = snapshot.ship.rect.width() / 4.0;
    if dx < -dead_zone {
        Command::MoveLeft
    } else if dx > dead_zone {
        Command::MoveRight
    } else {
        Command::Stop
    }
}
