//! Ready-made [`Integration`](crate::health::Integration) implementations.
//!
//! The aggregator does not care how a check is performed; these cover the
//! common cases (HTTP endpoint, TCP socket, ad hoc closure) and a timeout
//! wrapper for integrations that may hang.

mod error;
mod function;
mod http;
mod tcp;
mod timeout;

pub use error::IntegrationError;
pub use function::FnIntegration;
pub use http::HttpIntegration;
pub use tcp::TcpIntegration;
pub use timeout::Timeout;
