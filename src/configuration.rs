use crate::health::{HealthChecker, HealthConfig, Integration, Liveness};
use crate::integrations::{HttpIntegration, IntegrationError, TcpIntegration, Timeout};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "configuration";
pub const ENV_PREFIX: &str = "HEALTH";

#[derive(Debug, Clone, serde::Deserialize, PartialEq)]
pub struct Settings {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub integrations: Vec<IntegrationSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IntegrationSettings {
    Http {
        name: String,
        url: String,
        #[serde(default)]
        expected_status: Option<u16>,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },
    Tcp {
        name: String,
        address: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("integration `{name}`: invalid url `{url}`: {reason}")]
    InvalidUrl {
        name: String,
        url: String,
        reason: String,
    },
    #[error("integration `{name}`: invalid expected status {status}")]
    InvalidStatus { name: String, status: u16 },
    #[error("integration `{name}`: {source}")]
    Integration {
        name: String,
        #[source]
        source: IntegrationError,
    },
}

impl IntegrationSettings {
    pub fn name(&self) -> &str {
        match self {
            Self::Http { name, .. } | Self::Tcp { name, .. } => name,
        }
    }

    pub fn build(&self) -> Result<Box<dyn Integration>, ConfigurationError> {
        match self {
            Self::Http {
                name,
                url,
                expected_status,
                timeout_ms,
            } => {
                let parsed =
                    reqwest::Url::parse(url).map_err(|e| ConfigurationError::InvalidUrl {
                        name: name.clone(),
                        url: url.clone(),
                        reason: e.to_string(),
                    })?;

                let integration = match timeout_ms {
                    Some(ms) => HttpIntegration::with_timeout(
                        name.clone(),
                        parsed,
                        Duration::from_millis(*ms),
                    ),
                    None => HttpIntegration::new(name.clone(), parsed),
                }
                .map_err(|source| ConfigurationError::Integration {
                    name: name.clone(),
                    source,
                })?;

                let integration = match expected_status {
                    Some(code) => {
                        let status = reqwest::StatusCode::from_u16(*code).map_err(|_| {
                            ConfigurationError::InvalidStatus {
                                name: name.clone(),
                                status: *code,
                            }
                        })?;
                        integration.expect_status(status)
                    }
                    None => integration,
                };

                Ok(Box::new(integration))
            }
            Self::Tcp {
                name,
                address,
                timeout_ms,
            } => {
                let integration = TcpIntegration::new(name.clone(), address.clone());
                let integration: Box<dyn Integration> = match timeout_ms {
                    Some(ms) => Box::new(Timeout::new(integration, Duration::from_millis(*ms))),
                    None => Box::new(integration),
                };
                Ok(integration)
            }
        }
    }
}

impl Settings {
    /// Liveness never looks at the integration entries, so a broken entry
    /// cannot fail it.
    pub fn liveness(&self) -> Liveness {
        HealthChecker::new(HealthConfig::new(&self.name, &self.version)).liveness()
    }

    /// Builds the aggregator, keeping integrations in declaration order.
    pub fn health_checker(&self) -> Result<HealthChecker, ConfigurationError> {
        let integrations = self
            .integrations
            .iter()
            .map(|integration| {
                tracing::debug!(integration = integration.name(), "Registering integration");
                integration.build()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(HealthChecker::new(HealthConfig {
            name: self.name.clone(),
            version: self.version.clone(),
            integrations,
        }))
    }
}

/// Reads settings from `path` (any format the `config` crate knows; the file
/// is optional) and then from `HEALTH__*` environment variables.
pub fn get_configuration(path: Option<&str>) -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    read_settings(
        path,
        config::Environment::with_prefix(ENV_PREFIX).separator("__"),
    )
}

fn read_settings(
    path: Option<&str>,
    environment: config::Environment,
) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("name", "health-checker")?
        .set_default("version", env!("CARGO_PKG_VERSION"))?
        .add_source(
            config::File::with_name(path.unwrap_or(DEFAULT_CONFIG_FILE))
                .required(path.is_some()),
        )
        .add_source(environment)
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Environment source fed from `vars` instead of the process environment.
    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let source = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<config::Map<String, String>>();
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(Some(source))
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("Failed to create temp config");
        file.write_all(contents.as_bytes())
            .expect("Failed to write temp config");
        file
    }

    #[test]
    fn test_reads_integrations_in_order() {
        let file = write_config(
            r#"
name: orders
version: "2.1.0"
integrations:
  - kind: http
    name: payments
    url: http://payments.local/health
    expected_status: 204
    timeout_ms: 1500
  - kind: tcp
    name: postgres
    address: db:5432
"#,
        );

        let settings = read_settings(file.path().to_str(), environment(&[])).unwrap();
        assert_eq!(settings.name, "orders");
        assert_eq!(settings.version, "2.1.0");
        assert_eq!(
            settings.integrations,
            vec![
                IntegrationSettings::Http {
                    name: "payments".to_string(),
                    url: "http://payments.local/health".to_string(),
                    expected_status: Some(204),
                    timeout_ms: Some(1500),
                },
                IntegrationSettings::Tcp {
                    name: "postgres".to_string(),
                    address: "db:5432".to_string(),
                    timeout_ms: None,
                },
            ]
        );

        let checker = settings.health_checker().unwrap();
        assert_eq!(checker.integration_names(), vec!["payments", "postgres"]);
    }

    #[test]
    fn test_defaults_apply_without_integrations() {
        let file = write_config("name: solo\n");

        let settings = read_settings(file.path().to_str(), environment(&[])).unwrap();
        assert_eq!(settings.version, env!("CARGO_PKG_VERSION"));
        assert!(settings.integrations.is_empty());
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config("name: orders\nversion: \"1.0.0\"\n");

        let settings = read_settings(
            file.path().to_str(),
            environment(&[("HEALTH__NAME", "orders-canary"), ("OTHER__NAME", "ignored")]),
        )
        .unwrap();
        assert_eq!(settings.name, "orders-canary");
        assert_eq!(settings.version, "1.0.0");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(read_settings(Some("/nonexistent/health.yaml"), environment(&[])).is_err());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let settings = Settings {
            name: "svc".to_string(),
            version: "1".to_string(),
            integrations: vec![IntegrationSettings::Http {
                name: "broken".to_string(),
                url: "not a url".to_string(),
                expected_status: None,
                timeout_ms: None,
            }],
        };

        let err = settings.health_checker().err().expect("expected an error");
        assert!(matches!(err, ConfigurationError::InvalidUrl { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_liveness_ignores_broken_integrations() {
        let settings = Settings {
            name: "svc".to_string(),
            version: "1.4.2".to_string(),
            integrations: vec![IntegrationSettings::Http {
                name: "broken".to_string(),
                url: "not a url".to_string(),
                expected_status: Some(42),
                timeout_ms: None,
            }],
        };

        let liveness = settings.liveness();
        assert_eq!(liveness.status, "fully functional");
        assert_eq!(liveness.version, "1.4.2");
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let integration = IntegrationSettings::Http {
            name: "api".to_string(),
            url: "http://api.local/".to_string(),
            expected_status: Some(42),
            timeout_ms: None,
        };

        assert!(matches!(
            integration.build().err(),
            Some(ConfigurationError::InvalidStatus { status: 42, .. })
        ));
    }
}
