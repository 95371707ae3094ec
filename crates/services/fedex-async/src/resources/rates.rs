//! Rate-quote requests.

use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::client::Client;
use crate::config::Config;
use crate::context::RequestContext;
use crate::error::{self, ShippingError};
use crate::redact;
use crate::retry;
use crate::types::rates::RateQuoteRequest;
use crate::types::reply::RateReply;
use crate::types::token::AccessToken;

/// Rate-quote endpoint path
pub const RATE_QUOTES_PATH: &str = "/rate/v1/rates/quotes";

/// Cap on raw 400 bodies carried into error messages.
const BODY_SNIPPET_LIMIT: usize = 400;

/// API resource for the rate-quote endpoint.
pub struct Rates<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Rates<'c, C> {
    /// Creates the resource from a client reference.
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Submits a built payload and returns the raw carrier reply.
    ///
    /// Runs under the rates retry policy. A 400 reply means the carrier
    /// rejected the payload; that surfaces as `Validation` with the
    /// carrier's own error entries attached and is never retried.
    ///
    /// # Errors
    ///
    /// `Validation` for carrier 400s, `Authentication`/`Authorization` for
    /// token problems, `Network`/`Timeout` for transient transport
    /// problems, `ApiResponse` for other statuses or an unparseable
    /// success body.
    pub async fn quote(
        &self,
        token: &AccessToken,
        payload: &RateQuoteRequest,
        ctx: &RequestContext,
    ) -> Result<RateReply, ShippingError> {
        let url = self.client.config().url(RATE_QUOTES_PATH);
        retry::retry(self.client.rates_retry(), "rate_quote", ctx, || {
            self.submit(&url, token, payload, ctx)
        })
        .await
    }

    async fn submit(
        &self,
        url: &str,
        token: &AccessToken,
        payload: &RateQuoteRequest,
        ctx: &RequestContext,
    ) -> Result<RateReply, ShippingError> {
        tracing::trace!(
            request_id = %ctx.request_id(),
            payload = %redact::redacted(&serde_json::to_value(payload).unwrap_or_default()),
            "submitting rate request"
        );

        let response = self
            .client
            .http()
            .post(url)
            .timeout(self.client.rates_timeout())
            .header(AUTHORIZATION, format!("Bearer {}", token.token()))
            .json(payload)
            .send()
            .await
            .map_err(ShippingError::from)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ShippingError::from)?;

        if status == StatusCode::BAD_REQUEST {
            return Err(validation_error_from_body(&body));
        }
        if !status.is_success() {
            return Err(error::error_from_status(status, &body, "rate quote"));
        }

        let reply: RateReply = serde_json::from_slice(&body).map_err(|err| {
            ShippingError::api_response(
                format!("rate endpoint returned success with an unparseable body: {err}"),
                "The shipping carrier returned an unexpected response.",
            )
        })?;

        if let Some(transaction_id) = &reply.transaction_id {
            tracing::debug!(
                request_id = %ctx.request_id(),
                transaction_id = %transaction_id,
                "carrier reply received"
            );
        }
        if let Some(output) = &reply.output {
            for alert in &output.alerts {
                tracing::warn!(
                    request_id = %ctx.request_id(),
                    code = alert.code.as_deref().unwrap_or("-"),
                    message = alert.message.as_deref().unwrap_or("-"),
                    "carrier attached an alert to the reply"
                );
            }
        }

        Ok(reply)
    }
}

impl<C: Config> Client<C> {
    /// Returns the rate-quote API resource.
    #[must_use]
    pub const fn rates(&self) -> Rates<'_, C> {
        Rates::new(self)
    }
}

/// Builds the `Validation` error for a carrier 400, folding the body-level
/// `errors` (or legacy `messages`) array into the internal message and the
/// structured details.
fn validation_error_from_body(body: &[u8]) -> ShippingError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let upstream = parsed
        .as_ref()
        .and_then(|value| value.get("errors").or_else(|| value.get("messages")))
        .cloned();

    let summary = upstream.as_ref().and_then(collect_messages).unwrap_or_else(|| {
        String::from_utf8_lossy(&body[..body.len().min(BODY_SNIPPET_LIMIT)]).into_owned()
    });

    let err = ShippingError::validation(
        format!("carrier rejected the rate request: {summary}"),
        "The carrier rejected the shipment details for this quote.",
    );
    match upstream {
        Some(entries) => err.with_details(entries),
        None => err,
    }
}

/// Joins the `message` (falling back to `code`) of each upstream error
/// entry into one line.
fn collect_messages(entries: &Value) -> Option<String> {
    let list = entries.as_array()?;
    let parts: Vec<String> = list
        .iter()
        .filter_map(|entry| {
            entry
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| entry.get("code").and_then(Value::as_str))
                .map(str::to_string)
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join("; "))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn carrier_400_errors_fold_into_the_message_and_details() {
        let body = serde_json::to_vec(&json!({
            "transactionId": "tx-1",
            "errors": [
                { "code": "CURRENCY.TYPE.INVALID", "message": "Currency type is invalid." },
                { "code": "POSTAL.CODE.INVALID" }
            ]
        }))
        .unwrap();

        let err = validation_error_from_body(&body);
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("Currency type is invalid."));
        assert!(err.message.contains("POSTAL.CODE.INVALID"));
        assert_eq!(
            err.details.as_ref().and_then(|d| d.as_array()).map(Vec::len),
            Some(2)
        );
    }

    #[test]
    fn legacy_messages_array_is_accepted() {
        let body = serde_json::to_vec(&json!({
            "messages": [{ "message": "Account not eligible." }]
        }))
        .unwrap();

        let err = validation_error_from_body(&body);
        assert!(err.message.contains("Account not eligible."));
    }

    #[test]
    fn unparseable_400_bodies_fall_back_to_a_snippet() {
        let err = validation_error_from_body(b"<html>Bad Request</html>");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("<html>Bad Request</html>"));
        assert!(err.details.is_none());
    }
}
