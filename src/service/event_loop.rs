use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::task;

use super::{StopReason, Termination, state::GlobalState};
use crate::{
    error::{AggregatorErr, Result},
    metrics::AggregatorMetrics,
    model::Model,
    queue::UpdateEnvelope,
    synchronization::{RefreshEvent, SyncObserver, TargetSyncPolicy},
};

/// The single consumer of the update queue and the only writer of the models and counter.
///
/// Each iteration either stops (completion or stop request) or waits for the next envelope,
/// applies it to the current model, advances the counter and refreshes the target if an
/// interval boundary was crossed. An envelope is always processed to the end once dequeued.
pub struct AggregatorLoop<M: Model> {
    state: Arc<GlobalState<M>>,
    policy: TargetSyncPolicy,
    observer: Box<dyn SyncObserver>,
    metrics: AggregatorMetrics,
}

impl<M: Model> AggregatorLoop<M> {
    pub(super) fn new(
        state: Arc<GlobalState<M>>,
        policy: TargetSyncPolicy,
        observer: Box<dyn SyncObserver>,
    ) -> Self {
        Self {
            state,
            policy,
            observer,
            metrics: AggregatorMetrics::default(),
        }
    }

    /// Runs the loop until training completes, a stop is requested or an update fails.
    ///
    /// # Returns
    /// The termination report or `AggregatorErr::ApplyFailure`.
    ///
    /// # Panics
    /// If it's not driven by a multi-threaded tokio runtime.
    pub async fn run(mut self) -> Result<Termination, M::Error> {
        let state = Arc::clone(&self.state);
        let mut consumer = state.queue.consumer().await;

        info!(
            max_steps = state.counter.max_steps().get(),
            total_steps = state.counter.total(),
            pending = state.queue.len();
            "aggregator started"
        );

        let reason = loop {
            if state.counter.is_complete() {
                break StopReason::Completed;
            }

            if state.stop.is_cancelled() {
                break StopReason::StopRequested;
            }

            let envelope = tokio::select! {
                biased;
                _ = state.stop.cancelled() => continue,
                envelope = consumer.recv() => envelope,
            };

            let Some(envelope) = envelope else {
                // The queue owns a sender for as long as it lives.
                unreachable!("update queue closed while the aggregator holds it");
            };

            if let Err(e) = task::block_in_place(|| self.process(envelope)) {
                error!("aggregator stopped: {e}");
                return Err(e);
            }
        };

        let total_steps = state.counter.total();
        info!(
            total_steps = total_steps,
            updates = self.metrics.updates,
            target_refreshes = self.metrics.target_refreshes,
            pending = state.queue.len();
            "aggregator stopped: {reason}"
        );

        Ok(Termination {
            reason,
            total_steps,
            metrics: self.metrics,
        })
    }

    /// Applies a single envelope and refreshes the target if required.
    ///
    /// # Arguments
    /// * `envelope` - The dequeued envelope.
    ///
    /// # Returns
    /// `AggregatorErr::ApplyFailure` if the model rejected the update, the counter is left untouched.
    fn process(&mut self, envelope: UpdateEnvelope<M::Update>) -> Result<(), M::Error> {
        let Self {
            state,
            policy,
            observer,
            metrics,
        } = self;

        let (update, steps) = envelope.into_parts();
        let before = state.counter.total();

        if let Err(source) = state.store.apply_to_current(update, steps) {
            return Err(AggregatorErr::ApplyFailure {
                total_steps: before,
                steps: steps.get(),
                source,
            });
        }

        let after = state.counter.add_and_get(steps);
        metrics.bump_update(steps.get());
        debug!(steps = steps.get(), total_steps = after; "update applied");

        let boundaries_crossed = policy.boundaries_crossed(before, after);
        if boundaries_crossed == 0 {
            return Ok(());
        }

        match state.store.refresh_target() {
            Ok(()) => {
                metrics.bump_refresh();
                let event = RefreshEvent {
                    total_steps: after,
                    boundaries_crossed,
                };
                observer.target_refreshed(&event);
            }
            Err(e) => {
                metrics.bump_skipped_refresh();
                warn!(total_steps = after; "target refresh skipped, snapshot failed: {e}");
            }
        }

        Ok(())
    }
}
