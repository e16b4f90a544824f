use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{AggregatorHandle, AggregatorTask, event_loop::AggregatorLoop, state::GlobalState};
use crate::{
    config::AggregatorConfig,
    error::{AggregatorErr, Result},
    model::Model,
    queue::UpdateQueue,
    storage::{ModelStore, StepCounter},
    synchronization::{LogObserver, SyncObserver, TargetSyncPolicy},
};

/// Owns a not yet started aggregator.
///
/// Handles can be taken (and updates enqueued) before starting. Starting consumes the
/// `Aggregator`, so there is never more than one loop mutating the models.
pub struct Aggregator<M: Model> {
    state: Arc<GlobalState<M>>,
    policy: TargetSyncPolicy,
    observer: Box<dyn SyncObserver>,
}

impl<M: Model> Aggregator<M> {
    /// Creates a new `Aggregator`, refreshes are reported through a `LogObserver`.
    ///
    /// # Arguments
    /// * `initial` - The initial model, the target starts as a clone of it.
    /// * `config` - The validated bounds of the run.
    ///
    /// # Returns
    /// A new `Aggregator` or `AggregatorErr::CloneFailure` if the target couldn't be created.
    pub fn new(initial: M, config: AggregatorConfig) -> Result<Self, M::Error> {
        let store = ModelStore::new(initial).map_err(AggregatorErr::CloneFailure)?;

        let state = GlobalState {
            store,
            counter: StepCounter::new(config.max_steps()),
            queue: UpdateQueue::new(),
            stop: CancellationToken::new(),
        };

        Ok(Self {
            state: Arc::new(state),
            policy: TargetSyncPolicy::new(config.target_sync()),
            observer: Box::new(LogObserver),
        })
    }

    /// Replaces the observer notified on every target refresh.
    ///
    /// # Arguments
    /// * `observer` - The new observer.
    pub fn with_observer<O: SyncObserver>(mut self, observer: O) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Returns a new handle to this aggregator.
    pub fn handle(&self) -> AggregatorHandle<M> {
        AggregatorHandle::new(Arc::clone(&self.state))
    }

    /// Turns this aggregator into its loop.
    pub(crate) fn into_loop(self) -> AggregatorLoop<M> {
        AggregatorLoop::new(self.state, self.policy, self.observer)
    }

    /// Spawns the loop on the current tokio runtime.
    ///
    /// # Returns
    /// The supervisor side of the running loop.
    ///
    /// # Panics
    /// If called outside of a multi-threaded tokio runtime.
    pub fn start(self) -> AggregatorTask<M> {
        let handle = self.handle();
        let task = tokio::spawn(self.into_loop().run());
        AggregatorTask::new(task, handle)
    }
}
