//! Request and response types for the FedEx APIs.

/// Package weight and dimension model
pub mod package;
/// Rate-request wire types
pub mod rates;
/// Rate-reply wire types and the normalized rate
pub mod reply;
/// OAuth access token
pub mod token;
