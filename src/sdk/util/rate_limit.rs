use std::num::NonZeroU32;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Blocking facade over a governor rate limiter, cloneable across
/// providers.
#[derive(Clone)]
pub struct Limiter {
    inner: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl Limiter {
    pub fn new(quota: Quota) -> Self {
        Self {
            inner: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Parks the calling thread until the limiter admits another call.
    pub fn wait(&self) {
        while self.inner.check().is_err() {
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Shared courtesy limit for the public geocoder.
pub fn geocoder_limiter() -> Limiter {
    Limiter::new(Quota::per_second(NonZeroU32::MIN))
}
