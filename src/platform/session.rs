//! Threaded game session
//!
//! One simulation thread owns the `GameState`. Input arrives over the command
//! channel, frames leave as immutable `Arc<Snapshot>`s.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

use super::clock::{FpsMeter, MenaceClock};
use super::input::{self, CommandSender};
use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::consts::MAX_SUBSTEPS;
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{Command, GamePhase, GameState, Snapshot, WaveState, apply_command, tick};

/// Longest wall-clock gap fed into the accumulator per frame
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session already stopped")]
    AlreadyStopped,
    #[error("simulation thread panicked")]
    ThreadPanicked,
    #[error("could not start simulation thread: {0}")]
    Spawn(#[from] io::Error),
}

/// What a finished session leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub final_score: u32,
    pub high_score: u32,
    pub ticks: u64,
}

pub struct Session {
    commands: CommandSender,
    latest: Arc<Mutex<Arc<Snapshot>>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<SessionReport>>,
}

impl Session {
    /// Load the high score, build wave 1 and start the simulation thread
    pub fn spawn(
        settings: Settings,
        sink: Box<dyn AudioSink>,
        store: Box<dyn HighScoreStore>,
    ) -> Result<Self, SessionError> {
        let seed = settings.resolve_seed();
        let mut state = GameState::new(settings.field(), settings.tuning.clone(), seed);
        let stored_high = match store.load() {
            Ok(high) => high,
            Err(e) => {
                log::warn!("Could not load high score: {e}");
                0
            }
        };
        state.wave = WaveState::new(stored_high);
        log::info!("Session starting with seed {seed}, high score {stored_high}");

        let mut audio = AudioManager::new(sink);
        audio.set_master_volume(settings.audio.master_volume);
        audio.set_sfx_volume(settings.audio.sfx_volume);
        audio.set_muted(settings.audio.muted);

        let (commands, rx) = input::command_channel();
        let latest = Arc::new(Mutex::new(Arc::new(Snapshot::capture(&state, 0))));
        let stop = Arc::new(AtomicBool::new(false));

        let runner = Runner {
            state,
            audio,
            menace: MenaceClock::new(settings.menace_interval_ms),
            fps: FpsMeter::default(),
            step: settings.tick_dt(),
            rx,
            latest: Arc::clone(&latest),
            stop: Arc::clone(&stop),
            store,
            stored_high,
        };
        let handle = thread::Builder::new()
            .name("simulation".into())
            .spawn(move || runner.run())?;

        Ok(Self {
            commands,
            latest,
            stop,
            handle: Some(handle),
        })
    }

    /// Queue a command for the next frame; false if it was dropped
    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command)
    }

    /// Handle for feeding commands from another thread
    pub fn commands(&self) -> CommandSender {
        self.commands.clone()
    }

    /// Most recently published frame
    pub fn snapshot(&self) -> Arc<Snapshot> {
        match self.latest.lock() {
            Ok(latest) => Arc::clone(&latest),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the simulation thread and wait for it
    pub fn shutdown(&mut self) -> Result<SessionReport, SessionError> {
        let handle = self.handle.take().ok_or(SessionError::AlreadyStopped)?;
        self.stop.store(true, Ordering::Release);
        handle.join().map_err(|_| SessionError::ThreadPanicked)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.handle.is_some() {
            if let Err(e) = self.shutdown() {
                log::error!("Session shutdown on drop failed: {e}");
            }
        }
    }
}

/// State owned by the simulation thread
struct Runner {
    state: GameState,
    audio: AudioManager,
    menace: MenaceClock,
    fps: FpsMeter,
    step: f32,
    rx: Receiver<Command>,
    latest: Arc<Mutex<Arc<Snapshot>>>,
    stop: Arc<AtomicBool>,
    store: Box<dyn HighScoreStore>,
    stored_high: u32,
}

impl Runner {
    fn run(mut self) -> SessionReport {
        let frame = Duration::from_secs_f32(self.step);
        let start = Instant::now();
        let mut last = start;
        let mut accumulator = 0.0f32;

        while !self.stop.load(Ordering::Acquire) {
            let frame_start = Instant::now();

            for command in input::drain(&self.rx) {
                apply_command(&mut self.state, command);
            }

            let dt = (frame_start - last).as_secs_f32().min(MAX_FRAME_DT);
            last = frame_start;
            accumulator += dt;

            let mut substeps = 0;
            while accumulator >= self.step && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, self.step);
                let events = self.state.drain_events();
                self.audio.play_events(&events);
                accumulator -= self.step;
                substeps += 1;
            }

            let now_ms = (frame_start - start).as_millis() as u64;
            let playing = self.state.phase == GamePhase::Playing;
            if let Some(cue) = self.menace.poll(now_ms, !playing) {
                self.audio.play(SoundEffect::Menace(cue));
                self.state.toggle_animation_phase();
            }

            let fps = self.fps.record((frame_start - start).as_secs_f64() * 1000.0);
            self.publish(Snapshot::capture(&self.state, fps));

            let elapsed = frame_start.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }

        self.finish()
    }

    fn publish(&self, snapshot: Snapshot) {
        match self.latest.lock() {
            Ok(mut latest) => *latest = Arc::new(snapshot),
            Err(poisoned) => *poisoned.into_inner() = Arc::new(snapshot),
        }
    }

    fn finish(mut self) -> SessionReport {
        let report = SessionReport {
            final_score: self.state.wave.score,
            high_score: self.state.wave.high_score,
            ticks: self.state.time_ticks,
        };
        persist_high_score(self.store.as_mut(), self.stored_high, report.high_score);
        log::info!(
            "Session ended after {} ticks: score {}, high score {}",
            report.ticks,
            report.final_score,
            report.high_score
        );
        report
    }
}

/// Write the high score back only if this session beat it
fn persist_high_score(store: &mut dyn HighScoreStore, stored: u32, reached: u32) -> bool {
    if reached <= stored {
        return false;
    }
    match store.save(reached) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Could not save high score {reached}: {e}");
            false
        }
    }
}
