use super::integration::Integration;
use super::models::{
    Check, CheckError, ErrorValue, Liveness, Readiness, ReadinessIntegration, LIVENESS_STATUS,
};
use chrono::Utc;
use futures::future::join_all;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

/// Url reported for an integration whose `handle()` failed before producing a check.
pub const UNKNOWN_URL: &str = "unknown";

pub struct HealthConfig {
    pub name: String,
    pub version: String,
    pub integrations: Vec<Box<dyn Integration>>,
}

impl HealthConfig {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            integrations: Vec::new(),
        }
    }

    pub fn with_integration(mut self, integration: impl Integration + 'static) -> Self {
        self.integrations.push(Box::new(integration));
        self
    }
}

pub struct HealthChecker {
    name: String,
    version: String,
    integrations: Vec<Box<dyn Integration>>,
}

impl HealthChecker {
    pub fn new(config: HealthConfig) -> Self {
        Self {
            name: config.name,
            version: config.version,
            integrations: config.integrations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Registered integration names, in registration order.
    pub fn integration_names(&self) -> Vec<&str> {
        self.integrations.iter().map(|i| i.name()).collect()
    }

    pub fn liveness(&self) -> Liveness {
        Liveness {
            status: LIVENESS_STATUS.to_string(),
            version: self.version.clone(),
        }
    }

    /// Runs every integration concurrently and waits for all of them.
    ///
    /// Never fails: errors and panics from integrations end up in the report.
    /// A hanging integration hangs this call; wrap it in
    /// [`crate::integrations::Timeout`] to bound it.
    #[tracing::instrument(
        name = "Readiness check",
        skip(self),
        fields(service = %self.name, integrations = self.integrations.len())
    )]
    pub async fn readiness(&self) -> Readiness {
        let start = Instant::now();

        let results = join_all(
            self.integrations
                .iter()
                .map(|integration| check(integration.as_ref())),
        )
        .await;

        let duration = elapsed_seconds(start);
        let status = results.iter().all(|result| result.status);

        tracing::info!(status, duration, "Readiness check finished");

        Readiness {
            name: self.name.clone(),
            version: self.version.clone(),
            status,
            date: Utc::now(),
            duration,
            integrations: results,
        }
    }
}

#[tracing::instrument(name = "Check integration", skip(integration), fields(integration = %integration.name()))]
async fn check(integration: &dyn Integration) -> ReadinessIntegration {
    let start = Instant::now();
    let mut result = Check {
        url: Some(UNKNOWN_URL.to_string()),
        error: None,
    };

    match AssertUnwindSafe(integration.handle()).catch_unwind().await {
        Ok(Ok(check)) => result = check,
        Ok(Err(err)) => {
            tracing::error!("Integration failed: {:?}", err);
            result.error = Some(CheckError::from(err));
        }
        Err(payload) => {
            let message = format!("integration panicked: {}", panic_message(payload.as_ref()));
            tracing::error!("{}", message);
            result.error = Some(ErrorValue::new(message).into());
        }
    }

    let response_time = elapsed_seconds(start);
    if let Some(error) = result.error.as_ref().filter(|e| !e.is_empty()) {
        tracing::warn!(response_time, "Integration unhealthy: {}", error);
    }

    ReadinessIntegration::from_check(integration.name(), result, response_time)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic payload"
    }
}

fn elapsed_seconds(start: Instant) -> f64 {
    start.elapsed().as_secs_f64()
}
