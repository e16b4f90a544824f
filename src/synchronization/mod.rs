mod observer;
mod policy;

pub use observer::{LogObserver, RefreshEvent, SyncObserver};
pub use policy::TargetSyncPolicy;
