//! Fixed pause between bursts of catalog requests.

use tokio::time::{sleep, Duration};

/// Blocks the caller for a fixed interval.
///
/// The catalog proxy rejects a third request fired right after two others;
/// Add-Artist waits this long before its audio-feature request.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    interval: Duration,
}

impl Cooldown {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// A cooldown that returns immediately.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep for the configured interval.
    pub async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }
        log::info!(
            "Waiting {}s for the catalog rate limit",
            self.interval.as_secs()
        );
        sleep(self.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_none_returns_immediately() {
        let start = Instant::now();
        Cooldown::none().wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_waits_for_interval() {
        let cooldown = Cooldown::new(Duration::from_millis(20));
        let start = Instant::now();
        cooldown.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
