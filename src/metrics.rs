/// Counters kept by the aggregator loop over a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AggregatorMetrics {
    pub updates: u64,
    pub steps: u64,
    pub target_refreshes: u64,
    pub skipped_refreshes: u64,
}

impl AggregatorMetrics {
    #[inline]
    pub fn bump_update(&mut self, steps: u64) {
        self.updates = self.updates.saturating_add(1);
        self.steps = self.steps.saturating_add(steps);
    }

    #[inline]
    pub fn bump_refresh(&mut self) {
        self.target_refreshes = self.target_refreshes.saturating_add(1);
    }

    #[inline]
    pub fn bump_skipped_refresh(&mut self) {
        self.skipped_refreshes = self.skipped_refreshes.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_saturate() {
        let mut metrics = AggregatorMetrics::default();

        metrics.bump_update(3);
        metrics.bump_update(u64::MAX);
        assert_eq!(metrics.updates, 2);
        assert_eq!(metrics.steps, u64::MAX);
    }
}
