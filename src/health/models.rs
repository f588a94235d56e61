use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status reported by `liveness()` while the process can answer at all.
pub const LIVENESS_STATUS: &str = "fully functional";

/// Structured failure captured from an integration, typically an error
/// returned or a panic raised by `handle()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorValue {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            causes: Vec::new(),
        }
    }

    pub fn with_causes(mut self, causes: Vec<String>) -> Self {
        self.causes = causes;
        self
    }
}

impl From<&anyhow::Error> for ErrorValue {
    fn from(err: &anyhow::Error) -> Self {
        let causes = err.chain().skip(1).map(|cause| cause.to_string()).collect();
        Self::new(err.to_string()).with_causes(causes)
    }
}

impl From<anyhow::Error> for ErrorValue {
    fn from(err: anyhow::Error) -> Self {
        Self::from(&err)
    }
}

/// Failure detail attached to a [`Check`].
///
/// Serialized untagged, so JSON consumers see a plain string, a list of
/// strings or an object with `message`/`causes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CheckError {
    Message(String),
    Messages(Vec<String>),
    Structured(ErrorValue),
}

impl CheckError {
    /// Only an empty message counts as absent; a list fails even when empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Message(msg) => msg.is_empty(),
            Self::Messages(_) | Self::Structured(_) => false,
        }
    }
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(msg) => write!(f, "{}", msg),
            Self::Messages(msgs) => write!(f, "{}", msgs.join("; ")),
            Self::Structured(value) => {
                write!(f, "{}", value.message)?;
                for cause in &value.causes {
                    write!(f, ": {}", cause)?;
                }
                Ok(())
            }
        }
    }
}

impl From<String> for CheckError {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

impl From<&str> for CheckError {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

impl From<Vec<String>> for CheckError {
    fn from(msgs: Vec<String>) -> Self {
        Self::Messages(msgs)
    }
}

impl From<ErrorValue> for CheckError {
    fn from(value: ErrorValue) -> Self {
        Self::Structured(value)
    }
}

impl From<anyhow::Error> for CheckError {
    fn from(err: anyhow::Error) -> Self {
        Self::Structured(ErrorValue::from(&err))
    }
}

/// Raw result of one integration invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Check {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CheckError>,
}

impl Check {
    pub fn healthy(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            error: None,
        }
    }

    pub fn unhealthy(url: impl Into<String>, error: impl Into<CheckError>) -> Self {
        Self {
            url: Some(url.into()),
            error: Some(error.into()),
        }
    }

    pub fn with_error(mut self, error: impl Into<CheckError>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.error.as_ref().map_or(true, CheckError::is_empty)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Liveness {
    pub status: String,
    pub version: String,
}

/// Per-integration entry of a [`Readiness`] report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadinessIntegration {
    pub name: String,
    pub status: bool,
    /// Seconds spent in this integration alone.
    pub response_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CheckError>,
}

impl ReadinessIntegration {
    pub fn from_check(name: impl Into<String>, check: Check, response_time: f64) -> Self {
        Self {
            name: name.into(),
            status: check.is_healthy(),
            response_time,
            url: check.url,
            error: check.error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Readiness {
    pub name: String,
    pub version: String,
    pub status: bool,
    /// Report assembly time, taken after every integration finished.
    pub date: DateTime<Utc>,
    /// Seconds from dispatch of the first integration until the last one finished.
    pub duration: f64,
    pub integrations: Vec<ReadinessIntegration>,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        self.status
    }

    pub fn failing(&self) -> impl Iterator<Item = &ReadinessIntegration> {
        self.integrations.iter().filter(|i| !i.status)
    }
}
