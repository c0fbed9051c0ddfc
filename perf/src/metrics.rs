use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// Rolling window size for duration samples.
const WINDOW: usize = 100;

/// Soft latency targets. Exceeding one logs a warning; it never fails
/// the operation.
#[derive(Clone, Copy, Debug)]
pub struct SloTargets {
    pub switch_ms: u64,
    pub search_ms: u64,
}

impl Default for SloTargets {
    fn default() -> Self {
        Self {
            switch_ms: 100,
            search_ms: 50,
        }
    }
}

#[derive(Default)]
struct Windows {
    loads: VecDeque<u64>,
    searches: VecDeque<u64>,
}

/// Wall-clock duration tracking for loads and searches.
pub struct Metrics {
    slo: SloTargets,
    windows: Mutex<Windows>,
}

impl Metrics {
    pub fn new(slo: SloTargets) -> Self {
        Self {
            slo,
            windows: Mutex::new(Windows::default()),
        }
    }

    fn guard(&self) -> MutexGuard<'_, Windows> {
        self.windows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_load(&self, elapsed_ms: u64) {
        if elapsed_ms > self.slo.switch_ms {
            tracing::warn!(
                elapsed_ms,
                target_ms = self.slo.switch_ms,
                "perf: component switch exceeded target"
            );
        }
        let mut w = self.guard();
        push_rolling(&mut w.loads, elapsed_ms);
    }

    pub fn record_search(&self, elapsed_ms: u64) {
        if elapsed_ms > self.slo.search_ms {
            tracing::warn!(
                elapsed_ms,
                target_ms = self.slo.search_ms,
                "perf: search exceeded target"
            );
        }
        let mut w = self.guard();
        push_rolling(&mut w.searches, elapsed_ms);
    }

    pub fn summary(&self) -> serde_json::Value {
        let w = self.guard();
        serde_json::json!({
            "loads": window_stats(&w.loads),
            "searches": window_stats(&w.searches),
        })
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(SloTargets::default())
    }
}

fn push_rolling(window: &mut VecDeque<u64>, sample: u64) {
    if window.len() == WINDOW {
        window.pop_front();
    }
    window.push_back(sample);
}

fn window_stats(window: &VecDeque<u64>) -> serde_json::Value {
    if window.is_empty() {
        return serde_json::json!({ "samples": 0 });
    }
    let total: u64 = window.iter().sum();
    let max = window.iter().copied().max().unwrap_or(0);
    serde_json::json!({
        "samples": window.len(),
        "avg_ms": total / window.len() as u64,
        "max_ms": max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_bounded() {
        let metrics = Metrics::default();
        for i in 0..(WINDOW as u64 + 50) {
            metrics.record_load(i);
        }
        let summary = metrics.summary();
        assert_eq!(summary["loads"]["samples"], WINDOW);
    }

    #[test]
    fn summary_reports_avg_and_max() {
        let metrics = Metrics::default();
        metrics.record_search(10);
        metrics.record_search(30);
        let summary = metrics.summary();
        assert_eq!(summary["searches"]["avg_ms"], 20);
        assert_eq!(summary["searches"]["max_ms"], 30);
    }
}
