use std::{
    num::NonZeroU64,
    sync::atomic::{AtomicU64, Ordering},
};

/// Monotonic count of the steps processed so far.
///
/// Only the aggregator loop advances it, anyone may read it.
#[derive(Debug)]
pub struct StepCounter {
    total: AtomicU64,
    max_steps: NonZeroU64,
}

impl StepCounter {
    /// Creates a new `StepCounter` starting at zero.
    ///
    /// # Arguments
    /// * `max_steps` - The total at which training is complete.
    pub fn new(max_steps: NonZeroU64) -> Self {
        Self {
            total: AtomicU64::new(0),
            max_steps,
        }
    }

    /// Advances the counter, saturating at `u64::MAX`.
    ///
    /// # Arguments
    /// * `steps` - The amount of steps to add.
    ///
    /// # Returns
    /// The new total.
    pub(crate) fn add_and_get(&self, steps: NonZeroU64) -> u64 {
        let steps = steps.get();
        let advance = |total: u64| Some(total.saturating_add(steps));

        match self
            .total
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, advance)
        {
            Ok(previous) | Err(previous) => previous.saturating_add(steps),
        }
    }

    /// Returns the current total.
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Acquire)
    }

    /// Returns the configured step bound.
    pub fn max_steps(&self) -> NonZeroU64 {
        self.max_steps
    }

    /// Returns whether the total reached the step bound, once true it stays true.
    pub fn is_complete(&self) -> bool {
        self.total() >= self.max_steps.get()
    }
}
