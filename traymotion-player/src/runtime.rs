//! Real-time driver: a single-writer event loop around the engine

use crate::{AnimationEngine, IconSurface, TickTimer, TickToken};
use std::sync::mpsc::Receiver;

/// Messages accepted by the player loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// A timer tick fired
    Tick(TickToken),
    /// Re-decode the stored asset and restart
    Reload,
    /// Stop, release the sequence and leave the loop
    Shutdown,
}

/// Runs the engine until `Shutdown` arrives or every sender is gone.
///
/// All engine mutation happens on the calling thread, in the order events
/// arrive. Returns the number of frames shown by ticks.
pub fn run<T, S>(engine: &mut AnimationEngine<T, S>, events: Receiver<PlayerEvent>) -> u64
where
    T: TickTimer,
    S: IconSurface,
{
    let mut shown = 0;
    for event in events.iter() {
        match event {
            PlayerEvent::Tick(token) => {
                if engine.on_tick(token) {
                    shown += 1;
                }
            }
            PlayerEvent::Reload => {
                // reload logs its own failure and keeps the previous icon
                let _ = engine.reload();
            }
            PlayerEvent::Shutdown => break,
        }
    }

    engine.shutdown();
    tracing::debug!(frames_shown = shown, "Player loop finished");
    shown
}
