use crate::health::{Check, Integration};
use async_trait::async_trait;
use std::future::Future;

/// Adapts an async closure into an [`Integration`].
///
/// ```rust,ignore
/// let cache = FnIntegration::new("cache", || async {
///     Ok::<_, anyhow::Error>(Check::healthy("redis://cache"))
/// });
/// ```
pub struct FnIntegration<F> {
    name: String,
    handler: F,
}

impl<F, Fut> FnIntegration<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Check>> + Send,
{
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

#[async_trait]
impl<F, Fut> Integration for FnIntegration<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Check>> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self) -> anyhow::Result<Check> {
        (self.handler)().await
    }
}
