#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! Async FedEx rate-quote client with typed requests, reply normalization,
//! bounded retries, and wiremock tests.
//!
//! The crate covers the two calls a shipping quote needs: the OAuth
//! `client_credentials` exchange and the rate-quotes request. Around them it
//! provides the strict payload builder the rate API demands, a normalizer
//! that reconciles the several shapes the carrier uses to report a monetary
//! total, and the retry/error-classification machinery both endpoints share.

/// HTTP client implementation
pub mod client;
/// Configuration and credential types
pub mod config;
/// Request-scoped correlation context
pub mod context;
/// Destination-based currency defaults
pub mod currency;
/// Error types and classification
pub mod error;
/// Rate-reply normalization
pub mod normalize;
/// Rate-request payload assembly and pre-flight validation
pub mod payload;
/// Log redaction for credential-bearing values
pub mod redact;
/// API resource implementations
pub mod resources;
/// Retry logic utilities
pub mod retry;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::{Credentials, FedexConfig};
pub use crate::context::RequestContext;
pub use crate::error::{ErrorKind, ShippingError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::package::PackageDimensions;
    pub use crate::types::rates::{Address, RateQuoteRequest};
    pub use crate::types::reply::{NormalizedRate, RateReply};
    pub use crate::{Client, Credentials, ErrorKind, FedexConfig, RequestContext, ShippingError};
}
