use std::{mem, num::NonZeroU64};

use parking_lot::RwLock;

use crate::model::Model;

/// Holds the authoritative current model and the target snapshot.
///
/// Each model has its own lock. A mutation holds the write guard for its whole duration and
/// every snapshot holds the read guard for its whole duration, so a snapshot never sees half
/// of an update.
#[derive(Debug)]
pub struct ModelStore<M: Model> {
    current: RwLock<M>,
    target: RwLock<M>,
}

impl<M: Model> ModelStore<M> {
    /// Creates a new `ModelStore`, the target starts as a clone of `initial`.
    ///
    /// # Arguments
    /// * `initial` - The initial state of the current model.
    ///
    /// # Returns
    /// A new `ModelStore` or the model's error if the initial snapshot failed.
    pub fn new(initial: M) -> Result<Self, M::Error> {
        let target = initial.try_clone()?;

        Ok(Self {
            current: RwLock::new(initial),
            target: RwLock::new(target),
        })
    }

    /// Takes an independent snapshot of the current model.
    pub fn clone_current(&self) -> Result<M, M::Error> {
        self.current.read().try_clone()
    }

    /// Takes an independent snapshot of the target model.
    pub fn clone_target(&self) -> Result<M, M::Error> {
        self.target.read().try_clone()
    }

    /// Applies an update to the current model while holding its write guard.
    ///
    /// # Arguments
    /// * `update` - The update to consume.
    /// * `steps` - The amount of steps `update` represents.
    pub(crate) fn apply_to_current(
        &self,
        update: M::Update,
        steps: NonZeroU64,
    ) -> Result<(), M::Error> {
        self.current.write().apply_update(update, steps)
    }

    /// Replaces the whole target with a fresh snapshot of the current model.
    ///
    /// If the snapshot fails the previous target is left untouched.
    pub(crate) fn refresh_target(&self) -> Result<(), M::Error> {
        let snapshot = self.current.read().try_clone()?;
        let previous = mem::replace(&mut *self.target.write(), snapshot);

        // Released outside of the guard.
        drop(previous);
        Ok(())
    }
}
