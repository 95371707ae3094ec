//! Shared application state and environment-driven gateway settings.

use std::sync::Arc;

use fedex_async::Client;
use fedex_async::config::FedexConfig;
use fedex_async::types::rates::Address;

use crate::catalog::DimensionSource;

/// Fallback origin country when nothing else supplies one.
const DEFAULT_ORIGIN_COUNTRY: &str = "TH";
/// Fallback origin postal code when nothing else supplies one.
const DEFAULT_ORIGIN_POSTAL: &str = "10110";

/// State shared by every request. Nothing in here is request-scoped;
/// credentials, tokens, and correlation ids all travel as parameters.
#[derive(Clone)]
pub struct AppState {
    /// Carrier client.
    pub fedex: Client<FedexConfig>,
    /// Package dimension lookup.
    pub dimensions: Arc<dyn DimensionSource>,
    /// Origin used when the request does not override it.
    pub origin: Address,
}

impl AppState {
    pub fn new(
        fedex: Client<FedexConfig>,
        dimensions: Arc<dyn DimensionSource>,
        origin: Address,
    ) -> Self {
        Self {
            fedex,
            dimensions,
            origin,
        }
    }
}

/// Origin address from `RATE_GATEWAY_ORIGIN_COUNTRY` /
/// `RATE_GATEWAY_ORIGIN_POSTAL`, with fixed fallbacks for the warehouse
/// this gateway was built around.
pub fn origin_from_env() -> Address {
    let country =
        env_trimmed("RATE_GATEWAY_ORIGIN_COUNTRY").unwrap_or_else(|| DEFAULT_ORIGIN_COUNTRY.into());
    let postal =
        env_trimmed("RATE_GATEWAY_ORIGIN_POSTAL").unwrap_or_else(|| DEFAULT_ORIGIN_POSTAL.into());
    Address::new(postal, country)
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use fedex_async::test_support::EnvGuard;
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial(env)]
    fn origin_defaults_to_the_warehouse() {
        let _country = EnvGuard::remove("RATE_GATEWAY_ORIGIN_COUNTRY");
        let _postal = EnvGuard::remove("RATE_GATEWAY_ORIGIN_POSTAL");

        let origin = origin_from_env();
        assert_eq!(origin.country_code, "TH");
        assert_eq!(origin.postal_code, "10110");
    }

    #[test]
    #[serial(env)]
    fn origin_reads_env_overrides() {
        let _country = EnvGuard::set("RATE_GATEWAY_ORIGIN_COUNTRY", "de");
        let _postal = EnvGuard::set("RATE_GATEWAY_ORIGIN_POSTAL", " 10115 ");

        let origin = origin_from_env();
        assert_eq!(origin.country_code, "DE", "country is uppercased");
        assert_eq!(origin.postal_code, "10115", "postal is trimmed");
    }
}
