use tokio_util::sync::CancellationToken;

use crate::{
    model::Model,
    queue::UpdateQueue,
    storage::{ModelStore, StepCounter},
};

/// Everything shared between the aggregator loop and its handles.
pub(super) struct GlobalState<M: Model> {
    pub store: ModelStore<M>,
    pub counter: StepCounter,
    pub queue: UpdateQueue<M::Update>,
    pub stop: CancellationToken,
}
