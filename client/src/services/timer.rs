//! Timer for native hosts and tests

use std::time::Duration;

use async_trait::async_trait;

use super::ports::Timer;

/// [`Timer`] backed by the tokio clock
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
