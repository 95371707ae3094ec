//! OAuth `client_credentials` token exchange.

use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::client::Client;
use crate::config::{Config, Credentials};
use crate::context::RequestContext;
use crate::error::{self, ShippingError};
use crate::retry;
use crate::types::token::AccessToken;

/// Token endpoint path
pub const TOKEN_PATH: &str = "/oauth/token";

/// User-facing message for malformed token replies.
const MALFORMED_TOKEN_MSG: &str = "The carrier returned an unexpected authentication response.";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// API resource for the OAuth token endpoint.
pub struct Oauth<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Oauth<'c, C> {
    /// Creates the resource from a client reference.
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a short-lived bearer token.
    ///
    /// Runs under the auth retry policy: transport failures, carrier 5xx,
    /// and timeouts are retried with backoff; rejected credentials (401/403)
    /// fail immediately.
    ///
    /// # Errors
    ///
    /// `Authentication`/`Authorization` for rejected credentials, `Network`
    /// or `Timeout` for transient transport problems, `ApiResponse` for any
    /// other status or a success body without a usable `access_token`.
    pub async fn token(
        &self,
        credentials: &Credentials,
        ctx: &RequestContext,
    ) -> Result<AccessToken, ShippingError> {
        let url = self.client.config().url(TOKEN_PATH);
        retry::retry(self.client.auth_retry(), "oauth_token", ctx, || {
            self.fetch(&url, credentials, ctx)
        })
        .await
    }

    async fn fetch(
        &self,
        url: &str,
        credentials: &Credentials,
        ctx: &RequestContext,
    ) -> Result<AccessToken, ShippingError> {
        tracing::debug!(request_id = %ctx.request_id(), "requesting access token");

        let response = self
            .client
            .http()
            .post(url)
            .timeout(self.client.auth_timeout())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.expose_secret()),
            ])
            .send()
            .await
            .map_err(ShippingError::from)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ShippingError::from)?;

        if !status.is_success() {
            return Err(error::error_from_status(status, &body, "token exchange"));
        }

        let parsed: TokenResponse = serde_json::from_slice(&body).map_err(|err| {
            ShippingError::api_response(
                format!("token endpoint returned success with an unparseable body: {err}"),
                MALFORMED_TOKEN_MSG,
            )
        })?;

        match parsed.access_token.filter(|token| !token.trim().is_empty()) {
            Some(token) => {
                tracing::debug!(request_id = %ctx.request_id(), "access token issued");
                Ok(AccessToken::new(token, parsed.expires_in.unwrap_or_default()))
            }
            None => Err(ShippingError::api_response(
                "token endpoint returned success without an access_token",
                MALFORMED_TOKEN_MSG,
            )),
        }
    }
}

impl<C: Config> Client<C> {
    /// Returns the OAuth API resource.
    #[must_use]
    pub const fn oauth(&self) -> Oauth<'_, C> {
        Oauth::new(self)
    }
}
