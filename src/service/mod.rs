mod aggregator;
mod event_loop;
mod handle;
mod state;
mod task;
mod termination;

pub use aggregator::Aggregator;
pub use handle::AggregatorHandle;
pub use task::AggregatorTask;
pub use termination::{StopReason, Termination};
