use std::fmt::{self, Display};

use crate::metrics::AggregatorMetrics;

/// Why the aggregator loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The step total reached the configured bound.
    Completed,
    /// A stop was requested through a handle.
    StopRequested,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::StopRequested => f.write_str("stop requested"),
        }
    }
}

/// The report of a loop that stopped without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    pub reason: StopReason,
    pub total_steps: u64,
    pub metrics: AggregatorMetrics,
}
