mod checks;
mod integration;
mod models;

pub use checks::{HealthChecker, HealthConfig, UNKNOWN_URL};
pub use integration::Integration;
pub use models::{
    Check, CheckError, ErrorValue, Liveness, Readiness, ReadinessIntegration, LIVENESS_STATUS,
};
