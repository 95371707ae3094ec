//! HTTP client implementation.

use std::time::Duration;

use crate::config::{Config, FedexConfig};
use crate::retry::RetryPolicy;

/// Connect timeout shared by both endpoints.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default request timeout for the token exchange.
const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(30);
/// Default request timeout for a rate quote; quotes on international routes
/// can legitimately take a while.
const DEFAULT_RATES_TIMEOUT: Duration = Duration::from_secs(45);

/// FedEx API client.
///
/// Generic over [`Config`] so tests and alternate deployments can point it
/// at the sandbox or a mock server. The client is cheap to clone and holds
/// no request-scoped state; tokens and credentials travel as parameters.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
    auth_retry: RetryPolicy,
    rates_retry: RetryPolicy,
    auth_timeout: Duration,
    rates_timeout: Duration,
}

impl Client<FedexConfig> {
    /// Creates a client from environment-driven configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FedexConfig::new())
    }
}

impl Default for Client<FedexConfig> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Config> Client<C> {
    /// Creates a client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be built.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("reqwest client");
        Self {
            http,
            config,
            auth_retry: RetryPolicy::auth(),
            rates_retry: RetryPolicy::rates(),
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
            rates_timeout: DEFAULT_RATES_TIMEOUT,
        }
    }

    /// Replaces the underlying HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the token-exchange retry policy.
    #[must_use]
    pub fn with_auth_retry(mut self, policy: RetryPolicy) -> Self {
        self.auth_retry = policy;
        self
    }

    /// Replaces the rate-request retry policy.
    #[must_use]
    pub fn with_rates_retry(mut self, policy: RetryPolicy) -> Self {
        self.rates_retry = policy;
        self
    }

    /// Replaces the per-request timeouts for the two endpoints.
    #[must_use]
    pub fn with_timeouts(mut self, auth: Duration, rates: Duration) -> Self {
        self.auth_timeout = auth;
        self.rates_timeout = rates;
        self
    }

    /// Returns the client's configuration.
    pub const fn config(&self) -> &C {
        &self.config
    }

    pub(crate) const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) const fn auth_retry(&self) -> RetryPolicy {
        self.auth_retry
    }

    pub(crate) const fn rates_retry(&self) -> RetryPolicy {
        self.rates_retry
    }

    pub(crate) const fn auth_timeout(&self) -> Duration {
        self.auth_timeout
    }

    pub(crate) const fn rates_timeout(&self) -> Duration {
        self.rates_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policies_and_timeouts() {
        let client = Client::with_config(FedexConfig::default());
        assert_eq!(client.auth_retry(), RetryPolicy::auth());
        assert_eq!(client.rates_retry(), RetryPolicy::rates());
        assert_eq!(client.auth_timeout(), Duration::from_secs(30));
        assert_eq!(client.rates_timeout(), Duration::from_secs(45));
    }

    #[test]
    fn builders_override_policies_and_timeouts() {
        let fast = RetryPolicy {
            max_attempts: 1,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        };
        let client = Client::with_config(FedexConfig::default())
            .with_auth_retry(fast)
            .with_rates_retry(fast)
            .with_timeouts(Duration::from_millis(50), Duration::from_millis(75));

        assert_eq!(client.auth_retry(), fast);
        assert_eq!(client.rates_retry(), fast);
        assert_eq!(client.auth_timeout(), Duration::from_millis(50));
        assert_eq!(client.rates_timeout(), Duration::from_millis(75));
    }
}
