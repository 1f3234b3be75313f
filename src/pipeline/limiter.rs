use std::time::Duration;

use tokio::{
    sync::Mutex,
    time::{Instant, sleep_until},
};

pub const DEFAULT_MIN_CALL_INTERVAL: Duration = Duration::from_millis(100);

/// Keeps a fixed minimum gap between outbound service calls.
///
/// Idle time does not accumulate: after a long pause the next two calls
/// are still spaced by the full interval. Time is taken from tokio's
/// clock, so tests can drive it with a paused runtime.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the interval since the previous `throttle` has passed,
    /// then records now as the last call.
    pub async fn throttle(&self) {
        // the lock is held while sleeping so concurrent callers queue up
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let ready_at = previous + self.min_interval;
            if Instant::now() < ready_at {
                sleep_until(ready_at).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CALL_INTERVAL)
    }
}
