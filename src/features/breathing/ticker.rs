//! Periodic tick sources.
//!
//! A [`TickSource`] hands out a handle per running period. Dropping the handle
//! cancels the ticks. Every tick carries the generation it was scheduled
//! with, so a receiver can discard ticks that were already in flight when
//! their handle was dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::trace;

/// Shortest period a [`ThreadTicker`] sleeps between ticks.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// One tick from a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    /// Generation of the handle that produced this tick.
    pub generation: u64,
}

/// Something that can deliver periodic ticks until its handle is dropped.
pub trait TickSource {
    /// Owned timer; dropping it stops the ticks.
    type Handle;

    /// Begin ticking for `generation`.
    fn schedule(&mut self, generation: u64) -> Self::Handle;
}

/// Tick source backed by a sleeper thread per handle, delivering
/// [`TickEvent`]s over a channel.
#[derive(Debug, Clone)]
pub struct ThreadTicker {
    period: Duration,
    tx: Sender<TickEvent>,
}

impl ThreadTicker {
    /// Create a ticker and the receiver its ticks arrive on. Periods below
    /// [`MIN_PERIOD`] are raised to it.
    #[must_use]
    pub fn channel(period: Duration) -> (Self, Receiver<TickEvent>) {
        let (tx, rx) = mpsc::channel();
        let period = period.max(MIN_PERIOD);
        (Self { period, tx }, rx)
    }

    /// Tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }
}

impl TickSource for ThreadTicker {
    type Handle = TickerHandle;

    fn schedule(&mut self, generation: u64) -> TickerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let tx = self.tx.clone();
        let period = self.period;

        thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::Acquire) {
                break;
            }
            if tx.send(TickEvent { generation }).is_err() {
                break;
            }
        });

        trace!(generation, ?period, "tick thread started");
        TickerHandle {
            cancelled,
            generation,
        }
    }
}

/// Live timer from a [`ThreadTicker`]. The thread stops after its current
/// sleep once this is dropped.
#[derive(Debug)]
pub struct TickerHandle {
    cancelled: Arc<AtomicBool>,
    generation: u64,
}

impl TickerHandle {
    /// Generation this handle ticks for.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        trace!(generation = self.generation, "tick thread cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_ticker_delivers_generation() {
        let (mut ticker, rx) = ThreadTicker::channel(Duration::from_millis(5));
        let handle = ticker.schedule(7);

        let event = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(event.generation, 7);
        assert_eq!(handle.generation(), 7);
    }

    #[test]
    fn test_zero_period_is_raised_to_minimum() {
        let (ticker, _rx) = ThreadTicker::channel(Duration::ZERO);
        assert_eq!(ticker.period(), MIN_PERIOD);
    }

    #[test]
    fn test_dropping_handle_stops_ticks() {
        let (mut ticker, rx) = ThreadTicker::channel(Duration::from_millis(5));
        let handle = ticker.schedule(1);
        rx.recv_timeout(Duration::from_secs(2)).unwrap();

        drop(handle);
        thread::sleep(Duration::from_millis(50));
        while rx.try_recv().is_ok() {}

        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
