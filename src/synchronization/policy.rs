use crate::config::SyncInterval;

/// Decides when the target model has to follow the current one.
///
/// A refresh is due whenever an increment moves the total past a multiple of the interval.
/// A single increment crossing several multiples yields a single refresh, so the cadence is
/// approximate under large batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSyncPolicy {
    interval: SyncInterval,
}

impl TargetSyncPolicy {
    /// Creates a new `TargetSyncPolicy`.
    ///
    /// # Arguments
    /// * `interval` - The configured refresh interval.
    pub fn new(interval: SyncInterval) -> Self {
        Self { interval }
    }

    /// Counts how many multiples of the interval lie in `(before, after]`.
    ///
    /// # Arguments
    /// * `before` - The total before the increment.
    /// * `after` - The total after the increment.
    ///
    /// # Returns
    /// The amount of crossed boundaries, always `0` when disabled.
    pub fn boundaries_crossed(&self, before: u64, after: u64) -> u64 {
        match self.interval {
            SyncInterval::Every(interval) => {
                let interval = interval.get();
                (after / interval).saturating_sub(before / interval)
            }
            SyncInterval::Disabled => 0,
        }
    }

    /// Returns whether the increment from `before` to `after` requires a target refresh.
    pub fn should_refresh(&self, before: u64, after: u64) -> bool {
        self.boundaries_crossed(before, after) > 0
    }
}
