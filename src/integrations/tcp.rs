use super::IntegrationError;
use crate::health::{Check, Integration};
use async_trait::async_trait;
use tokio::net::TcpStream;

/// Checks that a TCP socket accepts connections.
pub struct TcpIntegration {
    name: String,
    address: String,
}

impl TcpIntegration {
    /// `address` is anything `tokio::net::lookup_host` resolves, e.g. `db:5432`.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    fn url(&self) -> String {
        format!("tcp://{}", self.address)
    }
}

#[async_trait]
impl Integration for TcpIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(name = "Check TCP socket", skip(self), fields(address = %self.address))]
    async fn handle(&self) -> anyhow::Result<Check> {
        TcpStream::connect(self.address.as_str())
            .await
            .map_err(|source| IntegrationError::Connect {
                address: self.address.clone(),
                source,
            })?;

        Ok(Check::healthy(self.url()))
    }
}
