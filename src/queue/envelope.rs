use std::num::NonZeroU64;

/// An update submitted by a worker together with the amount of steps it represents.
#[derive(Debug)]
pub struct UpdateEnvelope<U> {
    update: U,
    steps: NonZeroU64,
}

impl<U> UpdateEnvelope<U> {
    /// Creates a new `UpdateEnvelope`.
    ///
    /// # Arguments
    /// * `update` - The submitted update.
    /// * `steps` - The amount of environment steps behind `update`.
    pub fn new(update: U, steps: NonZeroU64) -> Self {
        Self { update, steps }
    }

    /// Returns the amount of steps this envelope accounts for.
    pub fn steps(&self) -> NonZeroU64 {
        self.steps
    }

    /// Returns a reference to the wrapped update.
    pub fn update(&self) -> &U {
        &self.update
    }

    /// Unwraps the envelope into its update and step count.
    pub fn into_parts(self) -> (U, NonZeroU64) {
        (self.update, self.steps)
    }
}
