use std::sync::Mutex;

/// Counters for one batch run.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub groups: usize,
    pub tables_read: usize,
    pub plots_written: usize,
    pub histograms_written: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_group(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.groups += 1;
        }
    }

    pub fn record_table(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.tables_read += 1;
        }
    }

    pub fn record_plot(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.plots_written += 1;
        }
    }

    pub fn record_histogram(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.histograms_written += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().map(|m| *m).unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let metrics = MetricsRecorder::new();
        metrics.record_group();
        metrics.record_table();
        metrics.record_table();
        metrics.record_plot();
        metrics.record_histogram();

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                groups: 1,
                tables_read: 2,
                plots_written: 1,
                histograms_written: 1,
            }
        );
    }
}
