use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metrics {
    pub renders: usize,
    pub regenerations: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_render(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.renders += 1;
        }
    }

    pub fn record_regeneration(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.regenerations += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
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
    fn counters_accumulate() {
        let recorder = MetricsRecorder::new();
        recorder.record_render();
        recorder.record_render();
        recorder.record_regeneration();
        assert_eq!(
            recorder.snapshot(),
            Metrics {
                renders: 2,
                regenerations: 1
            }
        );
    }
}
