mod counter;
mod store;

pub use counter::StepCounter;
pub use store::ModelStore;
