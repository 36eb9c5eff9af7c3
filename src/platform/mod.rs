//! Host-side plumbing around the simulation
//!
//! Wall clock, command input and the session thread. Nothing in here is
//! deterministic; `sim` never depends on it.

pub mod clock;
pub mod input;
pub mod session;

pub use clock::{FpsMeter, MenaceClock};
pub use input::{COMMAND_CAPACITY, CommandSender, command_channel};
pub use session::{Session, SessionError, SessionReport};
