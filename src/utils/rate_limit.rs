use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use log::{debug, warn};

/// Sliding-window limiter: at most `max_requests` per `window` for each key.
#[derive(Debug)]
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<Instant>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
            max_requests: max_requests.max(1),
            window,
        }
    }

    /// Takes a slot if one is free. Returns how long to wait otherwise.
    pub async fn try_acquire(&self, key: &str) -> Option<Duration> {
        let mut requests = self.requests.lock().await;
        let now = Instant::now();

        self.cleanup_old_requests(&mut requests, now);

        let history = requests.entry(key.to_string()).or_insert_with(Vec::new);
        if history.len() >= self.max_requests as usize {
            let oldest = history.first().copied().unwrap_or(now);
            return Some((oldest + self.window).saturating_duration_since(now));
        }

        history.push(now);
        None
    }

    #[cfg(test)]
    pub async fn check(&self, key: &str) -> bool {
        self.try_acquire(key).await.is_none()
    }

    /// Waits until a slot is free, then takes it. Never fails.
    pub async fn acquire(&self, key: &str) {
        let mut warned = false;
        while let Some(wait) = self.try_acquire(key).await {
            if !warned {
                warn!("Outbound rate limit reached for {}, delaying send", key);
                warned = true;
            }
            debug!("Waiting {:?} for a send slot on {}", wait, key);
            tokio::time::sleep(wait.max(Duration::from_millis(1))).await;
        }
    }

    fn cleanup_old_requests(&self, requests: &mut HashMap<String, Vec<Instant>>, now: Instant) {
        let window_start = now.checked_sub(self.window).unwrap_or(now);
        requests.retain(|_, timestamps| {
            timestamps.retain(|&time| time > window_start);
            !timestamps.is_empty()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limit() {
        let limiter = RateLimiter::new(2, Duration::from_millis(100));

        assert!(limiter.check("chat-1").await);
        assert!(limiter.check("chat-1").await);
        assert!(!limiter.check("chat-1").await);

        // Keys are independent
        assert!(limiter.check("chat-2").await);
    }

    #[tokio::test]
    async fn test_acquire_waits_for_window() {
        let limiter = RateLimiter::new(1, Duration::from_millis(50));
        limiter.acquire("chat").await;

        let start = Instant::now();
        limiter.acquire("chat").await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
