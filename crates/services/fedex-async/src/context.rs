//! Request-scoped correlation context.

use uuid::Uuid;

/// Correlation identifier threaded explicitly through the quote pipeline.
///
/// One context exists per inbound request and travels as a plain parameter.
/// Nothing about it lives in process-wide state, so concurrent requests keep
/// their log correlation and retry accounting fully independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
}

impl RequestContext {
    /// Creates a context with a freshly generated request id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Wraps an externally supplied correlation id.
    #[must_use]
    pub fn with_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// The correlation id for this request.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_distinct_ids() {
        let a = RequestContext::new();
        let b = RequestContext::new();
        assert_ne!(a.request_id(), b.request_id());
        assert!(!a.request_id().is_empty());
    }

    #[test]
    fn with_id_preserves_the_given_id() {
        let ctx = RequestContext::with_id("req-123");
        assert_eq!(ctx.request_id(), "req-123");
    }
}
