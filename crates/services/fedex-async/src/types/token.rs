//! OAuth access token.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Short-lived bearer token covering one quote pipeline run.
///
/// Tokens are fetched fresh for every inbound request and dropped when the
/// request finishes; nothing caches them across requests. `Debug` redacts
/// the token value.
#[derive(Clone)]
pub struct AccessToken {
    token: SecretString,
    expires_in_seconds: u64,
}

impl AccessToken {
    pub(crate) fn new(token: String, expires_in_seconds: u64) -> Self {
        Self {
            token: SecretString::from(token),
            expires_in_seconds,
        }
    }

    /// The raw bearer token value.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Seconds until the carrier expires the token, as reported at issue.
    #[must_use]
    pub fn expires_in_seconds(&self) -> u64 {
        self.expires_in_seconds
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("expires_in_seconds", &self.expires_in_seconds)
            .finish()
    }
}
