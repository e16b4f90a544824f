mod envelope;
mod queue;

pub use envelope::UpdateEnvelope;
pub use queue::{UpdateConsumer, UpdateQueue};
