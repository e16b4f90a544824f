use tokio::task::JoinHandle;

use super::{AggregatorHandle, Termination};
use crate::{error::Result, model::Model};

/// The supervisor side of a running aggregator loop.
pub struct AggregatorTask<M: Model> {
    task: JoinHandle<Result<Termination, M::Error>>,
    handle: AggregatorHandle<M>,
}

impl<M: Model> AggregatorTask<M> {
    pub(super) fn new(
        task: JoinHandle<Result<Termination, M::Error>>,
        handle: AggregatorHandle<M>,
    ) -> Self {
        Self { task, handle }
    }

    /// Returns the handle of the supervised aggregator.
    pub fn handle(&self) -> &AggregatorHandle<M> {
        &self.handle
    }

    /// Returns whether the loop already terminated.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the loop to terminate on its own.
    ///
    /// # Returns
    /// The termination report, the failure that stopped the loop or
    /// `AggregatorErr::Join` if the loop panicked.
    pub async fn join(self) -> Result<Termination, M::Error> {
        self.task.await?
    }

    /// Requests a cooperative stop and waits for the loop to terminate.
    ///
    /// # Returns
    /// The same as `Self::join`.
    pub async fn stop(self) -> Result<Termination, M::Error> {
        self.handle.request_stop();
        self.join().await
    }
}
