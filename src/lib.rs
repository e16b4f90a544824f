//! A central aggregator for asynchronous actor-learner training.
//!
//! Many workers compute updates against their own snapshots of a shared model and submit them
//! to an [`AggregatorHandle`]. A single background loop applies them one at a time to the
//! authoritative current model, counts the steps they represent and keeps a target snapshot
//! that follows the current model every configured amount of steps.

pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod queue;
pub mod service;
pub mod storage;
pub mod synchronization;

pub use config::{AggregatorConfig, AggregatorSpec, ConfigErr, SyncInterval, TargetSyncSpec};
pub use error::AggregatorErr;
pub use metrics::AggregatorMetrics;
pub use model::Model;
pub use queue::{UpdateEnvelope, UpdateQueue};
pub use service::{Aggregator, AggregatorHandle, AggregatorTask, StopReason, Termination};
pub use synchronization::{LogObserver, RefreshEvent, SyncObserver, TargetSyncPolicy};
