use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error("check timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("connection to {address} failed")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },
}
