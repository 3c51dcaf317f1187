//! The sequence clock: source of the global post order.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::Seq;

/// Monotonic counter handing out one [`Seq`] per post creation.
///
/// Owned by a service instance rather than living in process-wide state.
/// The counter is atomic so writers sharing a clock still observe a single
/// total order. Never reset, never reused.
#[derive(Debug, Default)]
pub struct SequenceClock {
    last: AtomicU64,
}

impl SequenceClock {
    /// Create a clock whose first tick is [`Seq::FIRST`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock and return the new sequence number.
    pub fn tick(&self) -> Seq {
        Seq(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The most recently issued sequence number, or `None` before the
    /// first tick.
    pub fn last(&self) -> Option<Seq> {
        match self.last.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Seq(n)),
        }
    }
}
