//! Configuration and credential types for the FedEx client.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::ShippingError;

/// Default FedEx API base URL (production)
pub const FEDEX_DEFAULT_BASE: &str = "https://apis.fedex.com";
/// FedEx sandbox base URL, for test credentials
pub const FEDEX_SANDBOX_BASE: &str = "https://apis-sandbox.fedex.com";

/// FedEx API credentials for one account.
///
/// All three fields identify the account, so `Debug` redacts all of them,
/// not just the secret. Credentials are resolved per request and must never
/// be stored in process-wide mutable state.
#[derive(Clone)]
pub struct Credentials {
    /// Billing account number, 8-12 digits.
    pub account_number: String,
    /// OAuth client id issued by the carrier.
    pub client_id: String,
    /// OAuth client secret issued by the carrier.
    pub client_secret: SecretString,
}

impl Credentials {
    /// Creates credentials, trimming surrounding whitespace from each field.
    #[must_use]
    pub fn new(
        account_number: impl AsRef<str>,
        client_id: impl AsRef<str>,
        client_secret: impl AsRef<str>,
    ) -> Self {
        Self {
            account_number: account_number.as_ref().trim().to_string(),
            client_id: client_id.as_ref().trim().to_string(),
            client_secret: SecretString::from(client_secret.as_ref().trim().to_string()),
        }
    }

    /// Checks that the credential set is complete and plausibly shaped.
    ///
    /// The account number must be 8-12 ASCII digits; the carrier rejects
    /// anything else at quote time with a much less helpful message.
    pub fn validate(&self) -> Result<(), ShippingError> {
        if self.client_id.is_empty() {
            return Err(ShippingError::configuration(
                "fedex clientId is missing or empty",
                "Carrier credentials are not fully configured.",
            ));
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err(ShippingError::configuration(
                "fedex clientSecret is missing or empty",
                "Carrier credentials are not fully configured.",
            ));
        }
        let account = &self.account_number;
        if account.len() < 8 || account.len() > 12 || !account.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ShippingError::configuration(
                "fedex accountNumber must be 8-12 digits",
                "Carrier credentials are not fully configured.",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_number", &"[REDACTED]")
            .field("client_id", &"[REDACTED]")
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for the FedEx client
///
/// Debug output redacts the credential fields via [`Credentials`]'s own
/// `Debug` implementation.
#[derive(Clone, Debug)]
pub struct FedexConfig {
    api_base: String,
    credentials: Option<Credentials>,
}

impl Default for FedexConfig {
    fn default() -> Self {
        let account = env_trimmed("FEDEX_ACCOUNT_NUMBER");
        let client_id = env_trimmed("FEDEX_CLIENT_ID");
        let client_secret = env_trimmed("FEDEX_CLIENT_SECRET");

        let credentials = match (account, client_id, client_secret) {
            (Some(account), Some(id), Some(secret)) => Some(Credentials::new(account, id, secret)),
            _ => None,
        };

        let api_base = env_trimmed("FEDEX_BASE_URL").unwrap_or_else(|| FEDEX_DEFAULT_BASE.into());

        Self {
            api_base,
            credentials,
        }
    }
}

impl FedexConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `FEDEX_ACCOUNT_NUMBER`, `FEDEX_CLIENT_ID`, `FEDEX_CLIENT_SECRET`
    ///   for the credential set (all three must be present)
    /// - `FEDEX_BASE_URL` for a custom API base URL (defaults to
    ///   `https://apis.fedex.com`; use `https://apis-sandbox.fedex.com` for
    ///   test credentials)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the credential set
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Clears any configured credentials
    #[must_use]
    pub fn without_credentials(mut self) -> Self {
        self.credentials = None;
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration trait for the FedEx client
///
/// Implement this trait to point the client at a different base URL (the
/// sandbox, a mock server) or to supply credentials from another source.
pub trait Config: Send + Sync {
    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;

    /// Returns the process-level credential set, if one is configured.
    ///
    /// Callers may still override these per request; absence here is only
    /// an error once no other source provides credentials either.
    fn credentials(&self) -> Option<&Credentials>;
}

impl Config for FedexConfig {
    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn config_reads_env_vars() {
        let _acct = EnvGuard::set("FEDEX_ACCOUNT_NUMBER", "123456789");
        let _id = EnvGuard::set("FEDEX_CLIENT_ID", "client-id-1");
        let _secret = EnvGuard::set("FEDEX_CLIENT_SECRET", "client-secret-1");
        let _base = EnvGuard::set("FEDEX_BASE_URL", "https://apis-sandbox.fedex.com");

        let cfg = FedexConfig::new();
        assert_eq!(cfg.api_base(), "https://apis-sandbox.fedex.com");

        let creds = cfg.credentials().expect("credentials from env");
        assert_eq!(creds.account_number, "123456789");
        assert_eq!(creds.client_id, "client-id-1");
        assert_eq!(creds.client_secret.expose_secret(), "client-secret-1");
    }

    #[test]
    #[serial(env)]
    fn config_defaults_base_url() {
        let _base = EnvGuard::remove("FEDEX_BASE_URL");

        let cfg = FedexConfig::new();
        assert_eq!(cfg.api_base(), FEDEX_DEFAULT_BASE);
    }

    #[test]
    #[serial(env)]
    fn partial_env_credentials_are_ignored() {
        let _acct = EnvGuard::set("FEDEX_ACCOUNT_NUMBER", "123456789");
        let _id = EnvGuard::set("FEDEX_CLIENT_ID", "client-id-1");
        let _secret = EnvGuard::remove("FEDEX_CLIENT_SECRET");

        let cfg = FedexConfig::new();
        assert!(cfg.credentials().is_none());
    }

    #[test]
    fn builder_methods() {
        let cfg = FedexConfig::default()
            .with_api_base("http://localhost:8080/")
            .with_credentials(Credentials::new("123456789", "id", "secret"));

        assert_eq!(cfg.api_base(), "http://localhost:8080/");
        assert!(cfg.credentials().is_some());
        assert_eq!(cfg.url("/oauth/token"), "http://localhost:8080/oauth/token");
    }

    #[test]
    fn url_joins_without_duplicate_slashes() {
        let cfg = FedexConfig::default().with_api_base("https://apis.fedex.com");
        assert_eq!(
            cfg.url("rate/v1/rates/quotes"),
            "https://apis.fedex.com/rate/v1/rates/quotes"
        );
        assert_eq!(
            cfg.url("/rate/v1/rates/quotes"),
            "https://apis.fedex.com/rate/v1/rates/quotes"
        );
    }

    #[test]
    fn debug_output_redacts_every_credential_field() {
        let cfg = FedexConfig::default()
            .with_credentials(Credentials::new("987654321", "id-abcdef", "super-secret-123"));
        let debug_str = format!("{cfg:?}");

        assert!(!debug_str.contains("987654321"), "account number leaked: {debug_str}");
        assert!(!debug_str.contains("id-abcdef"), "client id leaked: {debug_str}");
        assert!(!debug_str.contains("super-secret-123"), "secret leaked: {debug_str}");
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn credentials_trim_whitespace() {
        let creds = Credentials::new("  123456789  ", " id ", "  secret \n");
        assert_eq!(creds.account_number, "123456789");
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.client_secret.expose_secret(), "secret");
    }

    #[test]
    fn validate_accepts_a_complete_set() {
        let creds = Credentials::new("123456789", "client-id", "client-secret");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_fields() {
        assert!(Credentials::new("123456789", "", "secret").validate().is_err());
        assert!(Credentials::new("123456789", "id", "").validate().is_err());
        assert!(Credentials::new("123456789", "id", "   ").validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_account_numbers() {
        // Too short, too long, non-digit.
        assert!(Credentials::new("1234567", "id", "secret").validate().is_err());
        assert!(Credentials::new("1234567890123", "id", "secret").validate().is_err());
        assert!(Credentials::new("12345678a", "id", "secret").validate().is_err());

        // Boundary lengths pass.
        assert!(Credentials::new("12345678", "id", "secret").validate().is_ok());
        assert!(Credentials::new("123456789012", "id", "secret").validate().is_ok());
    }

    #[test]
    fn validation_failures_are_configuration_errors() {
        let err = Credentials::new("", "", "").validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
        assert_eq!(err.kind.http_status(), 422);
    }
}
