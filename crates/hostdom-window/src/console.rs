//! Console counters and timers

use std::collections::HashMap;
use std::time::Instant;

use tracing::{info, warn};

const DEFAULT_LABEL: &str = "<no label>";

/// `console.count` / `console.time` state. Output goes through `tracing`.
#[derive(Debug)]
pub struct Console {
    origin: Instant,
    counts: HashMap<String, u64>,
    timers: HashMap<String, f64>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            counts: HashMap::new(),
            timers: HashMap::new(),
        }
    }

    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Increment and log the counter for `label`
    pub fn count(&mut self, label: Option<&str>) -> u64 {
        let label = label.unwrap_or(DEFAULT_LABEL);
        let count = self.counts.entry(label.to_string()).or_insert(0);
        *count += 1;
        info!("{}: {}", label, count);
        *count
    }

    pub fn count_reset(&mut self, label: Option<&str>) {
        let label = label.unwrap_or(DEFAULT_LABEL);
        if self.counts.remove(label).is_none() {
            warn!("Count for '{}' does not exist", label);
        }
    }

    /// Start a timer; restarting an existing label resets it
    pub fn time(&mut self, label: Option<&str>) {
        let label = label.unwrap_or(DEFAULT_LABEL);
        let now = self.now();
        self.timers.insert(label.to_string(), now);
    }

    /// Stop a timer, returning elapsed milliseconds
    pub fn time_end(&mut self, label: Option<&str>) -> Option<f64> {
        let label = label.unwrap_or(DEFAULT_LABEL);
        let Some(start) = self.timers.remove(label) else {
            warn!("Timer '{}' does not exist", label);
            return None;
        };
        let elapsed = self.now() - start;
        info!("{}: {:.3}ms", label, elapsed);
        Some(elapsed)
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
