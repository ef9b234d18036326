//! Fixed-interval gate for outbound geocoding calls.
//!
//! The provider's usage policy caps each client identity at one request per
//! second, across every request this process serves. One [`RequestPacer`] is
//! created at startup and shared through `Arc`; each outbound lookup calls
//! [`RequestPacer::acquire`] first.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Serialises callers so consecutive permits are at least `min_interval` apart.
#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    last_permit: Mutex<Option<Instant>>,
}

impl RequestPacer {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_permit: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn from_millis(min_interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_interval_ms))
    }

    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until an outbound call is allowed, then claims the slot.
    ///
    /// The first permit is granted immediately. The lock is held across the
    /// wait, so concurrent callers queue in arrival order and each one is
    /// spaced from the previous permit.
    pub async fn acquire(&self) {
        let mut last = self.last_permit.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                tracing::debug!(
                    wait_ms = u64::try_from((ready_at - now).as_millis()).unwrap_or(u64::MAX),
                    "pacing geocoder request"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last = Some(Instant::now());
    }
}
