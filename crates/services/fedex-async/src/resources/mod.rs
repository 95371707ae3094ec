//! API resource implementations for the two FedEx endpoints a quote needs.

/// OAuth token exchange
pub mod oauth;
/// Rate-quote requests
pub mod rates;

pub use oauth::Oauth;
pub use rates::Rates;
