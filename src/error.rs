use std::{error::Error, fmt};

use tokio::task::JoinError;

/// The aggregator's result type, generic over the model's error.
pub type Result<T, E> = std::result::Result<T, AggregatorErr<E>>;

/// Failures surfaced by the aggregator.
#[derive(Debug)]
pub enum AggregatorErr<E> {
    /// The model failed applying an update, the loop stopped.
    ApplyFailure {
        total_steps: u64,
        steps: u64,
        source: E,
    },
    /// A snapshot of a model couldn't be created.
    CloneFailure(E),
    /// The loop task panicked or was aborted.
    Join(JoinError),
}

impl<E: fmt::Display> fmt::Display for AggregatorErr<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApplyFailure {
                total_steps,
                steps,
                source,
            } => write!(
                f,
                "failed applying an update of {steps} steps at total {total_steps}: {source}"
            ),
            Self::CloneFailure(e) => write!(f, "failed cloning model: {e}"),
            Self::Join(e) => write!(f, "aggregator task failed: {e}"),
        }
    }
}

impl<E: Error + 'static> Error for AggregatorErr<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ApplyFailure { source, .. } => Some(source),
            Self::CloneFailure(e) => Some(e),
            Self::Join(e) => Some(e),
        }
    }
}

impl<E> From<JoinError> for AggregatorErr<E> {
    fn from(value: JoinError) -> Self {
        Self::Join(value)
    }
}
