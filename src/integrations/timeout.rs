use super::IntegrationError;
use crate::health::{Check, Integration};
use async_trait::async_trait;
use std::time::Duration;

/// Bounds another integration's `handle()` with a deadline.
///
/// On expiry the inner check is dropped and the wrapper fails with
/// [`IntegrationError::Timeout`], which the aggregator reports as unhealthy.
pub struct Timeout<I> {
    inner: I,
    after: Duration,
}

impl<I: Integration> Timeout<I> {
    pub fn new(inner: I, after: Duration) -> Self {
        Self { inner, after }
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

#[async_trait]
impl<I: Integration> Integration for Timeout<I> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn handle(&self) -> anyhow::Result<Check> {
        match tokio::time::timeout(self.after, self.inner.handle()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(integration = %self.inner.name(), "Check timed out");
                Err(IntegrationError::Timeout { after: self.after }.into())
            }
        }
    }
}
