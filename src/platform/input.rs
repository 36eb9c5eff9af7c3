//! Input side of the command channel

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use crate::sim::Command;

/// Commands buffered between two simulation frames
pub const COMMAND_CAPACITY: usize = 64;

/// Cloneable handle input producers use to reach the simulation thread
///
/// Sending never blocks: a full queue drops the command.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: SyncSender<Command>,
}

impl CommandSender {
    /// Returns false when the command was not queued
    pub fn send(&self, command: Command) -> bool {
        match self.tx.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(command)) => {
                log::warn!("Command queue full, dropping {:?}", command);
                false
            }
            Err(TrySendError::Disconnected(command)) => {
                log::debug!("Session stopped, dropping {:?}", command);
                false
            }
        }
    }
}

pub fn command_channel() -> (CommandSender, Receiver<Command>) {
    let (tx, rx) = mpsc::sync_channel(COMMAND_CAPACITY);
    (CommandSender { tx }, rx)
}

/// Everything currently queued, in arrival order
pub fn drain(rx: &Receiver<Command>) -> Vec<Command> {
    rx.try_iter().collect()
}
