//! Wave partitioning.
//!
//! `[0, total)` is cut into windows of at most `batch_size` records, and the
//! windows are grouped into waves of at most `concurrency` windows.

use std::ops::Range;

/// The full dispatch schedule for one enrichment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    waves: Vec<Vec<Range<usize>>>,
}

impl BatchPlan {
    /// Compute the schedule. `concurrency` and `batch_size` are clamped to 1.
    pub fn new(total: usize, concurrency: usize, batch_size: usize) -> Self {
        let concurrency = concurrency.max(1);
        let batch_size = batch_size.max(1);

        let mut waves = Vec::new();
        let mut remaining = total;
        let mut cursor = 0;

        while remaining > 0 {
            let mut wave = Vec::with_capacity(concurrency);
            while wave.len() < concurrency && remaining > 0 {
                let n = batch_size.min(remaining);
                wave.push(cursor..cursor + n);
                cursor += n;
                remaining -= n;
            }
            waves.push(wave);
        }

        Self { waves }
    }

    /// Windows grouped by wave, in dispatch order.
    pub fn waves(&self) -> &[Vec<Range<usize>>] {
        &self.waves
    }

    /// Every window in dispatch order.
    pub fn windows(&self) -> Vec<Range<usize>> {
        self.waves.iter().flatten().cloned().collect()
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    pub fn window_count(&self) -> usize {
        self.waves.iter().map(Vec::len).sum()
    }
}
