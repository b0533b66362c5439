//! Truncated exponential backoff
//!
//! The wait before retry `i` is `min(2^i + jitter, cap)` units, with `jitter`
//! drawn uniformly from `[0, 1)`.

use crate::config::CrawlerSettings;
use std::time::Duration;

/// Default ceiling on a single wait, in units
pub const MAX_BACKOFF: f64 = 64.0;

/// Computes retry wait times
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    /// Ceiling on a single wait, in units
    pub cap: f64,

    /// Real time represented by one unit
    pub unit: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            cap: MAX_BACKOFF,
            unit: Duration::from_secs(1),
        }
    }
}

impl BackoffPolicy {
    pub fn from_settings(settings: &CrawlerSettings) -> Self {
        Self {
            cap: settings.max_backoff,
            unit: Duration::from_millis(settings.backoff_unit_ms),
        }
    }

    /// Wait before retrying after attempt `attempt` (0-based), with fresh jitter
    pub fn wait_time(&self, attempt: u32) -> Duration {
        self.wait_time_with_jitter(attempt, rand::random::<f64>())
    }

    /// Wait for a given jitter value in `[0, 1)`
    pub fn wait_time_with_jitter(&self, attempt: u32, jitter: f64) -> Duration {
        self.unit.mul_f64(backoff_units(attempt, jitter, self.cap))
    }
}

/// `min(2^attempt + jitter, cap)`
pub fn backoff_units(attempt: u32, jitter: f64, cap: f64) -> f64 {
    // 2^64 is already far past any sane cap
    let base = 2f64.powi(attempt.min(64) as i32);
    (base + jitter).min(cap)
}
