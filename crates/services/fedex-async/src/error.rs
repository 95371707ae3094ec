//! Error types and classification for the quote pipeline.
//!
//! Everything that can go wrong between an inbound quote request and the
//! normalized rates flows through [`ShippingError`]. The [`ErrorKind`]
//! vocabulary is closed on purpose: retry eligibility and the externally
//! visible HTTP status are decided from the kind alone, so a classification
//! made once at the failure site governs behavior everywhere downstream.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cap on upstream body snippets carried in error messages.
const BODY_SNIPPET_LIMIT: usize = 400;

/// Failure categories for the rate pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Caller input failed local checks, or the carrier rejected the payload.
    Validation,
    /// The carrier rejected the configured credentials.
    Authentication,
    /// The credentials are valid but lack access to the resource.
    Authorization,
    /// Transport failure or carrier 5xx.
    Network,
    /// Unexpected upstream status, or a success body we could not parse.
    ApiResponse,
    /// A well-formed success reply that yielded no usable rate.
    RateParsing,
    /// Dimension catalog or other storage failure.
    Database,
    /// Missing or unusable local configuration.
    Configuration,
    /// Client-side timeout waiting on the carrier.
    Timeout,
}

impl ErrorKind {
    /// Whether an operation failing with this kind may be attempted again.
    ///
    /// Deterministic failures are excluded: resubmitting bad input, bad
    /// credentials, or a broken configuration cannot succeed, so retrying
    /// them only burns time and rate limits.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        !matches!(
            self,
            Self::Validation | Self::Authentication | Self::Authorization | Self::Configuration
        )
    }

    /// The HTTP status the gateway reports for this kind.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Authentication | Self::Authorization => 401,
            Self::Timeout => 408,
            Self::Configuration => 422,
            Self::Network | Self::ApiResponse | Self::RateParsing | Self::Database => 500,
        }
    }
}

/// Error carried through the whole rate pipeline.
///
/// `message` is internal diagnostics and may name fields, statuses, and
/// upstream snippets. `user_message` is the only string permitted to reach
/// an HTTP response body; it never exposes endpoints, credentials, or
/// upstream internals.
#[derive(Debug, Error)]
#[error("[{kind:?}] {message}")]
pub struct ShippingError {
    /// Classification driving retries and HTTP status mapping.
    pub kind: ErrorKind,
    /// Internal diagnostic message.
    pub message: String,
    /// Safe, presentable message for API consumers.
    pub user_message: String,
    /// Optional structured context (field names, upstream error arrays).
    pub details: Option<serde_json::Value>,
}

impl ShippingError {
    /// Creates an error with the given kind and messages.
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            user_message: user_message.into(),
            details: None,
        }
    }

    /// Attaches structured context to the error.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Creates a `Validation` error.
    pub fn validation(message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message, user_message)
    }

    /// Creates an `Authentication` error.
    pub fn authentication(message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message, user_message)
    }

    /// Creates an `Authorization` error.
    pub fn authorization(message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message, user_message)
    }

    /// Creates a `Network` error.
    pub fn network(message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message, user_message)
    }

    /// Creates an `ApiResponse` error.
    pub fn api_response(message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ApiResponse, message, user_message)
    }

    /// Creates a `RateParsing` error.
    pub fn rate_parsing(message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateParsing, message, user_message)
    }

    /// Creates a `Database` error.
    pub fn database(message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message, user_message)
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message, user_message)
    }

    /// Creates a `Timeout` error.
    pub fn timeout(message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message, user_message)
    }

    /// Whether the failed operation may be attempted again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl From<reqwest::Error> for ShippingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(
                format!("request timed out: {err}"),
                "The carrier took too long to respond. Please try again.",
            )
        } else {
            Self::network(
                format!("transport error: {err}"),
                "Could not reach the shipping carrier. Please try again.",
            )
        }
    }
}

/// Classifies a non-success upstream status.
#[must_use]
pub fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status.as_u16() {
        401 => ErrorKind::Authentication,
        403 => ErrorKind::Authorization,
        500..=599 => ErrorKind::Network,
        _ => ErrorKind::ApiResponse,
    }
}

/// Builds the error for a non-2xx upstream reply.
///
/// The body snippet in the internal message is capped: carrier 5xx bodies
/// are occasionally HTML pages, and logs should stay bounded.
#[must_use]
pub fn error_from_status(status: StatusCode, body: &[u8], operation: &str) -> ShippingError {
    let kind = kind_for_status(status);
    let snippet = String::from_utf8_lossy(&body[..body.len().min(BODY_SNIPPET_LIMIT)]);
    let user_message = match kind {
        ErrorKind::Authentication => "The carrier rejected the configured credentials.",
        ErrorKind::Authorization => "The configured account is not allowed to use this service.",
        ErrorKind::Network => "The shipping carrier is temporarily unavailable. Please try again.",
        _ => "The shipping carrier returned an unexpected response.",
    };
    ShippingError::new(
        kind,
        format!("{operation} failed with status {status}: {snippet}"),
        user_message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_kinds_are_not_retryable() {
        for kind in [
            ErrorKind::Validation,
            ErrorKind::Authentication,
            ErrorKind::Authorization,
            ErrorKind::Configuration,
        ] {
            assert!(!kind.is_retryable(), "{kind:?} must not be retryable");
        }
    }

    #[test]
    fn transient_kinds_are_retryable() {
        for kind in [
            ErrorKind::Network,
            ErrorKind::ApiResponse,
            ErrorKind::RateParsing,
            ErrorKind::Database,
            ErrorKind::Timeout,
        ] {
            assert!(kind.is_retryable(), "{kind:?} must be retryable");
        }
    }

    #[test]
    fn http_status_mapping() {
        assert_eq!(ErrorKind::Validation.http_status(), 400);
        assert_eq!(ErrorKind::Authentication.http_status(), 401);
        assert_eq!(ErrorKind::Authorization.http_status(), 401);
        assert_eq!(ErrorKind::Timeout.http_status(), 408);
        assert_eq!(ErrorKind::Configuration.http_status(), 422);
        assert_eq!(ErrorKind::Network.http_status(), 500);
        assert_eq!(ErrorKind::ApiResponse.http_status(), 500);
        assert_eq!(ErrorKind::RateParsing.http_status(), 500);
        assert_eq!(ErrorKind::Database.http_status(), 500);
    }

    #[test]
    fn display_includes_kind_and_internal_message() {
        let err = ShippingError::validation("postalCode is empty", "Postal code is required.");
        assert_eq!(err.to_string(), "[Validation] postalCode is empty");
    }

    #[test]
    fn with_details_attaches_context() {
        let err = ShippingError::validation("bad input", "Bad input.")
            .with_details(serde_json::json!({ "problems": ["postalCode is empty"] }));
        let details = err.details.as_ref().and_then(|d| d.get("problems")).cloned();
        assert_eq!(details, Some(serde_json::json!(["postalCode is empty"])));
    }

    #[test]
    fn status_classification() {
        assert_eq!(
            kind_for_status(StatusCode::UNAUTHORIZED),
            ErrorKind::Authentication
        );
        assert_eq!(
            kind_for_status(StatusCode::FORBIDDEN),
            ErrorKind::Authorization
        );
        assert_eq!(
            kind_for_status(StatusCode::SERVICE_UNAVAILABLE),
            ErrorKind::Network
        );
        assert_eq!(
            kind_for_status(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorKind::Network
        );
        assert_eq!(kind_for_status(StatusCode::NOT_FOUND), ErrorKind::ApiResponse);
        assert_eq!(
            kind_for_status(StatusCode::TOO_MANY_REQUESTS),
            ErrorKind::ApiResponse
        );
    }

    #[test]
    fn error_from_status_caps_the_snippet() {
        let body = vec![b'x'; 2_000];
        let err = error_from_status(StatusCode::BAD_GATEWAY, &body, "rate quote");
        assert_eq!(err.kind, ErrorKind::Network);
        assert!(err.message.len() < 600, "snippet not capped: {}", err.message.len());
    }

    #[test]
    fn kind_serializes_as_variant_name() {
        let json = serde_json::to_string(&ErrorKind::RateParsing).unwrap();
        assert_eq!(json, "\"RateParsing\"");
    }
}
