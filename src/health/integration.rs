use super::models::Check;
use async_trait::async_trait;
use std::sync::Arc;

/// A health probe for one dependency.
///
/// `handle()` reports a soft failure by returning a [`Check`] carrying an
/// error, or a hard failure by returning `Err`. The aggregator treats both
/// the same way and never lets either escape a readiness pass.
#[async_trait]
pub trait Integration: Send + Sync {
    /// Stable identifier used in reports.
    fn name(&self) -> &str;

    async fn handle(&self) -> anyhow::Result<Check>;
}

#[async_trait]
impl<T: Integration + ?Sized> Integration for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn handle(&self) -> anyhow::Result<Check> {
        (**self).handle().await
    }
}

#[async_trait]
impl<T: Integration + ?Sized> Integration for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn handle(&self) -> anyhow::Result<Check> {
        (**self).handle().await
    }
}
