//! Animation scheduler state machine

use crate::{IconSurface, TickTimer, TickToken};
use std::sync::Arc;
use traymotion_core::RenderSequence;

/// Whether a timer loop is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Playing,
}

/// Cycles a render sequence onto an icon surface.
///
/// Each tick shows `sequence[index]`, re-arms the timer for that frame's
/// delay and advances `index` circularly. A single-frame sequence is shown
/// once without arming the timer.
pub struct AnimationScheduler<T: TickTimer> {
    timer: T,
    state: SchedulerState,
    index: usize,
    pending: Option<TickToken>,
    sequence: Option<Arc<RenderSequence>>,
}

impl<T: TickTimer> AnimationScheduler<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            state: SchedulerState::Idle,
            index: 0,
            pending: None,
            sequence: None,
        }
    }

    /// Starts cycling `sequence` from its first frame.
    ///
    /// Does nothing while already playing or when the sequence is empty.
    pub fn start<S: IconSurface + ?Sized>(
        &mut self,
        sequence: Arc<RenderSequence>,
        surface: &mut S,
    ) -> SchedulerState {
        if self.state == SchedulerState::Playing {
            tracing::debug!("Animation already playing");
            return self.state;
        }

        self.index = 0;
        match sequence.len() {
            0 => {
                self.sequence = None;
            }
            1 => {
                if let Err(e) = surface.set_icon(&sequence.frames()[0]) {
                    tracing::warn!(error = %e, "Failed to set static icon");
                }
                self.sequence = Some(sequence);
            }
            len => {
                tracing::debug!(frames = len, "Animation started");
                self.sequence = Some(sequence);
                self.state = SchedulerState::Playing;
                self.show_current(surface);
            }
        }
        self.state
    }

    /// Handles a fired tick. Stale or post-stop ticks are ignored.
    ///
    /// Returns true when a frame was shown.
    pub fn on_tick<S: IconSurface + ?Sized>(&mut self, token: TickToken, surface: &mut S) -> bool {
        if self.state != SchedulerState::Playing || self.pending != Some(token) {
            tracing::trace!(?token, "Ignoring stale tick");
            return false;
        }
        self.pending = None;
        self.show_current(surface)
    }

    /// Cancels the pending tick and returns to idle; the sequence is kept
    pub fn stop(&mut self) {
        if let Some(token) = self.pending.take() {
            self.timer.cancel(token);
        }
        if self.state == SchedulerState::Playing {
            tracing::debug!("Animation stopped");
        }
        self.state = SchedulerState::Idle;
        self.index = 0;
    }

    /// Stops and drops the reference to the sequence
    pub fn release(&mut self) {
        self.stop();
        self.sequence = None;
    }

    fn show_current<S: IconSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let sequence = match &self.sequence {
            Some(sequence) if !sequence.is_empty() => Arc::clone(sequence),
            _ => {
                self.stop();
                return false;
            }
        };

        let frame = &sequence.frames()[self.index];
        if let Err(e) = surface.set_icon(frame) {
            tracing::warn!(error = %e, index = self.index, "Icon update failed, stopping animation");
            self.stop();
            return false;
        }

        self.index = (self.index + 1) % sequence.len();
        self.pending = Some(self.timer.schedule(frame.delay()));
        true
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SchedulerState::Playing
    }

    /// Index of the frame the next tick will show
    pub fn next_index(&self) -> usize {
        self.index
    }

    /// The sequence currently attached, if any
    pub fn sequence(&self) -> Option<&Arc<RenderSequence>> {
        self.sequence.as_ref()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}
