pub mod configuration;
pub mod health;
pub mod integrations;
pub mod telemetry;
