use std::num::NonZeroU64;

use super::{ConfigErr, Result};

/// How often the target model follows the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncInterval {
    /// Refresh the target every time the total crosses a multiple of this many steps.
    Every(NonZeroU64),
    /// The target keeps its initial snapshot for the whole run.
    Disabled,
}

impl SyncInterval {
    /// Creates a new `SyncInterval`, `None` disables target refreshing.
    ///
    /// # Arguments
    /// * `steps` - The interval in steps, if any.
    ///
    /// # Returns
    /// A new `SyncInterval` or `ConfigErr::ZeroSyncInterval` if `steps` is zero.
    pub fn new(steps: Option<u64>) -> Result<Self> {
        match steps {
            Some(steps) => NonZeroU64::new(steps)
                .map(Self::Every)
                .ok_or(ConfigErr::ZeroSyncInterval),
            None => Ok(Self::Disabled),
        }
    }

    /// Returns the interval in steps, `None` when disabled.
    pub fn steps(&self) -> Option<NonZeroU64> {
        match self {
            Self::Every(steps) => Some(*steps),
            Self::Disabled => None,
        }
    }
}

/// Immutable bounds of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    max_steps: NonZeroU64,
    target_sync: SyncInterval,
}

impl AggregatorConfig {
    /// Creates a new validated `AggregatorConfig`.
    ///
    /// # Arguments
    /// * `max_steps` - The total amount of steps after which training is complete.
    /// * `target_sync_interval` - Steps between target refreshes, `None` to disable them.
    ///
    /// # Returns
    /// A new `AggregatorConfig` or a `ConfigErr` if any of the values is zero.
    pub fn new(max_steps: u64, target_sync_interval: Option<u64>) -> Result<Self> {
        let max_steps = NonZeroU64::new(max_steps).ok_or(ConfigErr::ZeroMaxSteps)?;
        let target_sync = SyncInterval::new(target_sync_interval)?;

        Ok(Self {
            max_steps,
            target_sync,
        })
    }

    /// Returns the step bound of the run.
    pub fn max_steps(&self) -> NonZeroU64 {
        self.max_steps
    }

    /// Returns the target refresh interval.
    pub fn target_sync(&self) -> SyncInterval {
        self.target_sync
    }
}
