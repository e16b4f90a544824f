use log::info;

/// Reported every time the target model is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshEvent {
    /// The total amount of steps once the triggering update was applied.
    pub total_steps: u64,
    /// How many interval multiples the triggering update crossed.
    pub boundaries_crossed: u64,
}

/// Receives the target refresh notifications of an aggregator.
///
/// Called from the aggregator loop right after the refresh, implementations should return quickly.
pub trait SyncObserver: Send + Sync + 'static {
    fn target_refreshed(&self, event: &RefreshEvent);
}

impl<F> SyncObserver for F
where
    F: Fn(&RefreshEvent) + Send + Sync + 'static,
{
    fn target_refreshed(&self, event: &RefreshEvent) {
        self(event)
    }
}

/// The default observer, it logs every refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl SyncObserver for LogObserver {
    fn target_refreshed(&self, event: &RefreshEvent) {
        info!(
            total_steps = event.total_steps,
            boundaries = event.boundaries_crossed;
            "target model refreshed"
        );
    }
}
