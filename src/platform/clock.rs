//! Wall-clock helpers that sit outside the deterministic simulation

use crate::audio::MenaceCue;

/// Alternating low/high cue once more than the interval has passed
///
/// The timer only advances while the game is running; a paused poll resets
/// the reference point so the next cue comes a full interval after resume.
#[derive(Debug, Clone)]
pub struct MenaceClock {
    interval_ms: u64,
    last_ms: Option<u64>,
    next: MenaceCue,
}

impl MenaceClock {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            last_ms: None,
            next: MenaceCue::Low,
        }
    }

    pub fn poll(&mut self, now_ms: u64, paused: bool) -> Option<MenaceCue> {
        if paused {
            self.last_ms = None;
            return None;
        }
        let last = *self.last_ms.get_or_insert(now_ms);
        if now_ms.saturating_sub(last) <= self.interval_ms {
            return None;
        }
        self.last_ms = Some(now_ms);
        let cue = self.next;
        self.next = cue.other();
        Some(cue)
    }
}

const FPS_WINDOW: usize = 60;

/// Frames per second over the last `FPS_WINDOW` frames
#[derive(Debug, Clone)]
pub struct FpsMeter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsMeter {
    /// Record a frame at `time_ms` and return the current estimate
    pub fn record(&mut self, time_ms: f64) -> u32 {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest holds the oldest sample once the ring is full
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
