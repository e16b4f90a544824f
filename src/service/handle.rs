use std::{num::NonZeroU64, sync::Arc};

use log::info;
use tokio::task;

use super::state::GlobalState;
use crate::{
    error::{AggregatorErr, Result},
    model::Model,
    queue::UpdateEnvelope,
};

/// The interface workers and supervisors use to talk to an aggregator.
///
/// Handles are cheap to clone and can be used from any thread at any time, before, during
/// or after the loop runs.
pub struct AggregatorHandle<M: Model> {
    state: Arc<GlobalState<M>>,
}

impl<M: Model> Clone for AggregatorHandle<M> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<M: Model> AggregatorHandle<M> {
    pub(super) fn new(state: Arc<GlobalState<M>>) -> Self {
        Self { state }
    }

    /// Submits an update to be applied by the aggregator loop, never blocks nor fails.
    ///
    /// # Arguments
    /// * `update` - The update, ownership is transferred to the aggregator.
    /// * `steps` - The amount of environment steps the update represents.
    pub fn enqueue(&self, update: M::Update, steps: NonZeroU64) {
        self.state.queue.enqueue(update, steps);
    }

    /// Takes a snapshot of the current model.
    ///
    /// # Returns
    /// An independent copy of the model or `AggregatorErr::CloneFailure`.
    pub fn clone_current_model(&self) -> Result<M, M::Error> {
        self.state
            .store
            .clone_current()
            .map_err(AggregatorErr::CloneFailure)
    }

    /// Takes a snapshot of the target model.
    ///
    /// # Returns
    /// An independent copy of the model or `AggregatorErr::CloneFailure`.
    pub fn clone_target_model(&self) -> Result<M, M::Error> {
        self.state
            .store
            .clone_target()
            .map_err(AggregatorErr::CloneFailure)
    }

    /// Async call to `Self::clone_current_model`, the copy runs without stalling the runtime.
    ///
    /// # Panics
    /// If it's not driven by a multi-threaded tokio runtime.
    pub async fn pull_current_model(&self) -> Result<M, M::Error> {
        task::block_in_place(|| self.clone_current_model())
    }

    /// Async call to `Self::clone_target_model`, the copy runs without stalling the runtime.
    ///
    /// # Panics
    /// If it's not driven by a multi-threaded tokio runtime.
    pub async fn pull_target_model(&self) -> Result<M, M::Error> {
        task::block_in_place(|| self.clone_target_model())
    }

    /// Returns whether the step total reached the configured bound.
    pub fn is_training_complete(&self) -> bool {
        self.state.counter.is_complete()
    }

    /// Asks the loop to stop once it's done with the envelope it's processing, if any.
    ///
    /// Envelopes that were not dequeued yet stay in the queue.
    pub fn request_stop(&self) {
        if !self.state.stop.is_cancelled() {
            info!(total_steps = self.total_steps(); "stop requested");
        }

        self.state.stop.cancel();
    }

    /// Returns whether no stop was requested yet.
    pub fn is_running(&self) -> bool {
        !self.state.stop.is_cancelled()
    }

    /// Returns the amount of steps processed so far.
    pub fn total_steps(&self) -> u64 {
        self.state.counter.total()
    }

    /// Returns the configured step bound.
    pub fn max_steps(&self) -> NonZeroU64 {
        self.state.counter.max_steps()
    }

    /// Returns the amount of envelopes waiting to be applied.
    pub fn pending_updates(&self) -> usize {
        self.state.queue.len()
    }

    /// Removes the envelopes the loop left behind.
    ///
    /// # Returns
    /// The pending envelopes in queue order, empty while the loop is still running.
    pub fn drain_pending(&self) -> Vec<UpdateEnvelope<M::Update>> {
        self.state.queue.drain()
    }
}
