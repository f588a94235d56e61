#![allow(dead_code)]

use health_checker::health::{Check, CheckError, Integration};
use health_checker::integrations::FnIntegration;
use std::time::Duration;

pub fn healthy(name: &str, url: &str) -> impl Integration {
    let url = url.to_string();
    FnIntegration::new(name, move || {
        let url = url.clone();
        async move { Ok::<_, anyhow::Error>(Check::healthy(url)) }
    })
}

/// Returns a check carrying an error instead of failing.
pub fn soft_failure(name: &str, url: &str, error: CheckError) -> impl Integration {
    let url = url.to_string();
    FnIntegration::new(name, move || {
        let check = Check::unhealthy(url.clone(), error.clone());
        async move { Ok::<_, anyhow::Error>(check) }
    })
}

/// Fails outright from `handle()`.
pub fn hard_failure(name: &str, message: &'static str) -> impl Integration {
    FnIntegration::new(name, move || async move {
        Err::<Check, _>(anyhow::anyhow!(message))
    })
}

pub fn delayed(name: &str, url: &str, delay: Duration) -> impl Integration {
    let url = url.to_string();
    FnIntegration::new(name, move || {
        let url = url.clone();
        async move {
            tokio::time::sleep(delay).await;
            Ok::<_, anyhow::Error>(Check::healthy(url))
        }
    })
}
