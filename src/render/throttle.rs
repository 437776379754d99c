use std::time::{Duration, Instant};

/// Enforces a minimum delay between consecutive page loads
#[derive(Debug, Clone)]
pub struct Throttle {
    delay: Duration,
    last_request_time: Option<Instant>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request_time: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Checks whether a request may start at `now`
    pub fn can_request(&self, now: Instant) -> bool {
        self.time_until_next_request(now).is_none()
    }

    /// Remaining wait before the next request may start, if any
    ///
    /// # Arguments
    ///
    /// * `now` - The current time instant
    ///
    /// # Returns
    ///
    /// * `Some(Duration)` - Time left until the delay has elapsed
    /// * `None` - A request can be made immediately
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);

        if elapsed < self.delay {
            Some(self.delay - elapsed)
        } else {
            None
        }
    }

    /// Sleeps until the next request is allowed
    pub async fn wait(&self) {
        if let Some(remaining) = self.time_until_next_request(Instant::now()) {
            tracing::debug!("Waiting {:?} before next page load", remaining);
            tokio::time::sleep(remaining).await;
        }
    }

    /// Records that a request was just made
    pub fn record_request(&mut self, now: Instant) {
        self.last_request_time = Some(now);
    }
}
