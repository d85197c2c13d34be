//! Staggered value reveal for ordered lists (skill levels).
//!
//! Entry `i` starts `base_delay + i * step` ms after mount. Once started its
//! bar jumps to the target width (the CSS transition does the easing) and its
//! counter climbs from 0 with an exponential ease-out.

use tracing::debug;

pub const DEFAULT_BASE_DELAY_MS: u32 = 500;
pub const DEFAULT_STEP_MS: u32 = 100;
pub const DEFAULT_COUNT_UP_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct StagedEntry {
    pub key: String,
    pub target_value: f64,
    /// Start offset from mount, base delay included.
    pub delay_ms: u32,
}

#[derive(Debug, Clone)]
pub struct StagedAnimator {
    entries: Vec<StagedEntry>,
    started_at: Vec<Option<f64>>,
    count_up_ms: f64,
    cancelled: bool,
}

impl StagedAnimator {
    /// Derives the schedule from an ordered list. Order is kept even when
    /// target values are equal.
    pub fn schedule<I, K>(items: I, base_delay_ms: u32, step_ms: u32, count_up_ms: u32) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let entries: Vec<StagedEntry> = items
            .into_iter()
            .enumerate()
            .map(|(i, (key, target_value))| StagedEntry {
                key: key.into(),
                target_value,
                delay_ms: base_delay_ms.saturating_add((i as u32).saturating_mul(step_ms)),
            })
            .collect();
        let started_at = vec![None; entries.len()];
        Self { entries, started_at, count_up_ms: count_up_ms as f64, cancelled: false }
    }

    pub fn entries(&self) -> &[StagedEntry] {
        &self.entries
    }

    pub fn start_times(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.delay_ms).collect()
    }

    pub fn is_started(&self, index: usize) -> bool {
        matches!(self.started_at.get(index), Some(Some(_)))
    }

    /// Indexes whose start time has passed but that have not been started.
    pub fn due(&self, elapsed_ms: f64) -> Vec<usize> {
        if self.cancelled {
            return Vec::new();
        }
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, e)| self.started_at[*i].is_none() && elapsed_ms >= e.delay_ms as f64)
            .map(|(i, _)| i)
            .collect()
    }

    /// Marks entry `index` as started at `now_ms`. Returns false when the
    /// entry is unknown, already started or the schedule was cancelled.
    pub fn start(&mut self, index: usize, now_ms: f64) -> bool {
        if self.cancelled {
            return false;
        }
        match self.started_at.get_mut(index) {
            Some(slot) if slot.is_none() => {
                *slot = Some(now_ms);
                debug!(key = %self.entries[index].key, "staged entry started");
                true
            }
            _ => false,
        }
    }

    /// Bar width in percent: 0 until started, then the target.
    pub fn bar_width(&self, index: usize) -> f64 {
        match (self.entries.get(index), self.started_at.get(index)) {
            (Some(e), Some(Some(_))) => e.target_value,
            _ => 0.0,
        }
    }

    /// Counter value at `now_ms`, eased from 0 to the target.
    pub fn counter_value(&self, index: usize, now_ms: f64) -> f64 {
        let (Some(entry), Some(Some(start))) = (self.entries.get(index), self.started_at.get(index)) else {
            return 0.0;
        };
        if self.count_up_ms <= 0.0 {
            return entry.target_value;
        }
        let t = ((now_ms - start) / self.count_up_ms).clamp(0.0, 1.0);
        entry.target_value * ease_out_expo(t)
    }

    /// True while any started counter has not reached its target.
    pub fn is_counting(&self, now_ms: f64) -> bool {
        !self.cancelled
            && self.started_at.iter().any(|s| match s {
                Some(start) => now_ms - start < self.count_up_ms,
                None => false,
            })
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// Exponential ease-out, normalised so that `t = 1` lands exactly on 1.
pub fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    if t <= 0.0 {
        return 0.0;
    }
    (1.0 - 2f64.powf(-10.0 * t)) * 1024.0 / 1023.0
}
