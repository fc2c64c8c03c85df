//! One-shot tick timers

use crate::PlayerEvent;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

/// Identifies one scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

/// Schedules one-shot ticks that are delivered back to the scheduler
pub trait TickTimer {
    /// Arms a tick after `delay`
    fn schedule(&mut self, delay: Duration) -> TickToken;

    /// Disarms a tick; cancelling an already-fired token is a no-op
    fn cancel(&mut self, token: TickToken);
}

/// Timer that only records what was scheduled.
///
/// Nothing fires on its own; the caller pops pending ticks and feeds them to
/// the scheduler, which makes tick order fully deterministic.
#[derive(Debug, Default)]
pub struct ManualTimer {
    next: u64,
    pending: Vec<(TickToken, Duration)>,
    cancelled: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks scheduled and not yet popped or cancelled
    pub fn pending(&self) -> &[(TickToken, Duration)] {
        &self.pending
    }

    /// Removes the oldest pending tick
    pub fn pop_next(&mut self) -> Option<(TickToken, Duration)> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// How many ticks were cancelled while still pending
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl TickTimer for ManualTimer {
    fn schedule(&mut self, delay: Duration) -> TickToken {
        let token = TickToken(self.next);
        self.next += 1;
        self.pending.push((token, delay));
        token
    }

    fn cancel(&mut self, token: TickToken) {
        let before = self.pending.len();
        self.pending.retain(|(t, _)| *t != token);
        self.cancelled += before - self.pending.len();
    }
}

/// Timer backed by sleeping threads that post ticks into the engine's channel
pub struct ChannelTimer {
    sender: Sender<PlayerEvent>,
    next: u64,
    armed: HashMap<TickToken, Arc<AtomicBool>>,
}

impl ChannelTimer {
    pub fn new(sender: Sender<PlayerEvent>) -> Self {
        Self {
            sender,
            next: 0,
            armed: HashMap::new(),
        }
    }
}

impl TickTimer for ChannelTimer {
    fn schedule(&mut self, delay: Duration) -> TickToken {
        // Forget ticks whose sleeper thread has already finished
        self.armed.retain(|_, flag| Arc::strong_count(flag) > 1);

        let token = TickToken(self.next);
        self.next += 1;

        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            if !flag.load(Ordering::SeqCst) {
                let _ = sender.send(PlayerEvent::Tick(token));
            }
        });

        self.armed.insert(token, cancelled);
        token
    }

    fn cancel(&mut self, token: TickToken) {
        if let Some(flag) = self.armed.remove(&token) {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_manual_timer_order_and_cancel() {
        let mut timer = ManualTimer::new();
        let a = timer.schedule(Duration::from_millis(10));
        let b = timer.schedule(Duration::from_millis(20));
        assert_ne!(a, b);

        timer.cancel(a);
        timer.cancel(a);
        assert_eq!(timer.cancelled(), 1);
        assert_eq!(timer.pop_next(), Some((b, Duration::from_millis(20))));
        assert_eq!(timer.pop_next(), None);
    }

    #[test]
    fn test_channel_timer_delivers_tick() {
        let (tx, rx) = mpsc::channel();
        let mut timer = ChannelTimer::new(tx);
        let token = timer.schedule(Duration::from_millis(5));

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            PlayerEvent::Tick(t) => assert_eq!(t, token),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_channel_timer_cancel_suppresses_tick() {
        let (tx, rx) = mpsc::channel();
        let mut timer = ChannelTimer::new(tx);
        let token = timer.schedule(Duration::from_millis(50));
        timer.cancel(token);

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
