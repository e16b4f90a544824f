use std::{error::Error, num::NonZeroU64};

/// The capability set the aggregator needs from a trainable model.
///
/// The aggregator never looks inside a model, it only takes whole snapshots of it and
/// hands it updates to apply. Any concrete representation works as long as it implements
/// these two operations.
pub trait Model: Sized + Send + Sync + 'static {
    /// An opaque batch of deltas produced by a worker.
    type Update: Send + 'static;

    /// The error returned whenever a snapshot or an update fails.
    type Error: Error + Send + Sync + 'static;

    /// Should create an independent deep copy of the model.
    ///
    /// # Returns
    /// The copy or an error if it couldn't be created (e.g. resource exhaustion).
    fn try_clone(&self) -> Result<Self, Self::Error>;

    /// Should apply `update` in place.
    ///
    /// # Arguments
    /// * `update` - The update to consume.
    /// * `steps` - The amount of environment steps the update represents.
    ///
    /// # Returns
    /// An error if the model rejected the update, the model may be partially modified.
    fn apply_update(&mut self, update: Self::Update, steps: NonZeroU64) -> Result<(), Self::Error>;
}
