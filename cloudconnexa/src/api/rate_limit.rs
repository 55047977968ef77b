//! Token-bucket limiter shared by every request a client issues

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Time to refill one token.
    pub interval: Duration,
    /// Bucket capacity; requests that may go out back to back.
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            burst: 5,
        }
    }
}

impl RateLimitConfig {
    pub fn new(interval: Duration, burst: u32) -> Self {
        Self { interval, burst }
    }
}

/// Absorbs float drift in the refill arithmetic.
const TOKEN_EPSILON: f64 = 1e-9;
const MIN_WAIT: Duration = Duration::from_millis(1);

pub struct RateLimiter {
    interval: Duration,
    capacity: f64,
    bucket: Mutex<Bucket>,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn refill(&mut self, interval: Duration, capacity: f64) {
        let now = Instant::now();
        if interval.is_zero() {
            self.tokens = capacity;
        } else {
            let elapsed = now.duration_since(self.last_refill);
            let earned = elapsed.as_secs_f64() / interval.as_secs_f64();
            self.tokens = (self.tokens + earned).min(capacity);
        }
        self.last_refill = now;
    }
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let capacity = f64::from(config.burst.max(1));
        Self {
            interval: config.interval,
            capacity,
            bucket: Mutex::new(Bucket {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Wait until a token is available and take it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().await;
                bucket.refill(self.interval, self.capacity);
                if bucket.tokens >= 1.0 - TOKEN_EPSILON {
                    bucket.tokens = (bucket.tokens - 1.0).max(0.0);
                    return;
                }
                self.interval
                    .mul_f64(1.0 - bucket.tokens)
                    .max(MIN_WAIT)
            };

            tracing::trace!("Rate limited, waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Whole tokens currently in the bucket.
    pub async fn available(&self) -> u32 {
        let mut bucket = self.bucket.lock().await;
        bucket.refill(self.interval, self.capacity);
        bucket.tokens.floor() as u32
    }
}
