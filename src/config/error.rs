use std::{
    error::Error,
    fmt::{self, Display},
};

/// The specific result type for configuration validation.
pub type Result<T> = std::result::Result<T, ConfigErr>;

/// Error returned when building an `AggregatorConfig` from invalid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErr {
    ZeroMaxSteps,
    ZeroSyncInterval,
}

impl Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxSteps => f.write_str("invalid config: max_steps must be at least 1"),
            Self::ZeroSyncInterval => {
                f.write_str("invalid config: the target sync interval must be at least 1 step")
            }
        }
    }
}

impl Error for ConfigErr {}
