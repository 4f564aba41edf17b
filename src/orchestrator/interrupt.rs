//! Interrupt observation
//!
//! SIGINT deliveries are counted on an atomic; the blocking wait in the
//! runner polls the counter. One interrupt requests a graceful stop of the
//! current child, a second escalates to a forced kill.

use signal_hook::consts::SIGINT;
use signal_hook::iterator::Signals;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Shared SIGINT counter.
#[derive(Clone)]
pub struct InterruptState {
    hits: Arc<AtomicUsize>,
}

impl InterruptState {
    /// Register the SIGINT watcher and start counting.
    pub fn install() -> io::Result<Self> {
        let state = Self {
            hits: Arc::new(AtomicUsize::new(0)),
        };
        let counter = Arc::clone(&state.hits);
        let mut signals = Signals::new([SIGINT])?;
        thread::Builder::new()
            .name("sigint-watcher".to_string())
            .spawn(move || {
                for _ in signals.forever() {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            })?;
        Ok(state)
    }

    /// A counter with no signal wired to it. Interrupts are only observed
    /// through [`record`](Self::record); used by tests.
    pub fn disconnected() -> Self {
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Total SIGINT deliveries observed so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Count one interrupt, as the watcher thread would.
    pub fn record(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}
