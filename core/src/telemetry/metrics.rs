/// Counters kept by a [`crate::Session`] across both controllers.
#[derive(Debug, Default)]
pub struct SessionMetrics {
    inner: MetricsSnapshot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub dispatched: usize,
    pub applied: usize,
    pub discarded: usize,
    pub failed: usize,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dispatched(&mut self) {
        self.inner.dispatched += 1;
    }

    /// Records a completion; `failed` only counts towards applied ones.
    pub fn record_completion(&mut self, applied: bool, failed: bool) {
        if applied {
            self.inner.applied += 1;
            if failed {
                self.inner.failed += 1;
            }
        } else {
            self.inner.discarded += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discarded_completions_are_not_failures() {
        let mut metrics = SessionMetrics::new();
        metrics.record_dispatched();
        metrics.record_dispatched();
        metrics.record_completion(true, true);
        metrics.record_completion(false, true);

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                dispatched: 2,
                applied: 1,
                discarded: 1,
                failed: 1,
            }
        );
    }
}
