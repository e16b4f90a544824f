mod aggregator;
mod error;
mod spec;

pub use aggregator::{AggregatorConfig, SyncInterval};
pub use error::{ConfigErr, Result};
pub use spec::{AggregatorSpec, TargetSyncSpec};
