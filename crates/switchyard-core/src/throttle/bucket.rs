//! Token bucket

use tokio::time::Instant;

/// Token bucket refilled continuously at `rpm / 60` tokens per second
#[derive(Debug, Clone)]
pub(super) struct TokenBucket {
    tokens: f64,
    capacity: f64,
    per_second: f64,
    last_refill: Instant,
}

impl TokenBucket {
    pub fn new(rpm: u32, burst: u32, now: Instant) -> Self {
        let capacity = f64::from(rpm) + f64::from(burst);
        Self {
            tokens: capacity,
            capacity,
            per_second: f64::from(rpm) / 60.0,
            last_refill: now,
        }
    }

    fn refill(&mut self, now: Instant) {
        // Instants handed in out of order must not drain the bucket
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.per_second).min(self.capacity);
        if now > self.last_refill {
            self.last_refill = now;
        }
    }

    /// Take one token if available
    pub fn try_take(&mut self, now: Instant) -> bool {
        self.refill(now);
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    pub fn available(&mut self, now: Instant) -> f64 {
        self.refill(now);
        self.tokens
    }

    /// Rebuild capacity when the configured rate changed
    pub fn matches_rate(&self, rpm: u32, burst: u32) -> bool {
        (self.capacity - (f64::from(rpm) + f64::from(burst))).abs() < f64::EPSILON
    }
}
