use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Default console API base URL
pub const CONSOLE_DEFAULT_BASE: &str = "http://localhost:5000";
/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the console client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    api_base: String,
    api_key: Option<SecretString>,
    request_timeout: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let api_key = std::env::var("CONSOLE_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        let api_base = std::env::var("CONSOLE_BASE_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| CONSOLE_DEFAULT_BASE.into());

        Self {
            api_base,
            api_key,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ConsoleConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `CONSOLE_API_KEY` for bearer authentication (optional)
    /// - `CONSOLE_BASE_URL` for the API base URL (defaults to `http://localhost:5000`)
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

    /// Sets the bearer token sent with every request
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Sets the per-request timeout used by [`Client::with_config`](crate::Client::with_config)
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// Configuration trait for the console client
///
/// Implement this trait to provide custom authentication and API configuration.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, crate::error::ConsoleError>;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;

    /// Returns query parameters to include in requests
    fn query(&self) -> Vec<(&str, &str)>;

    /// Per-request timeout applied to the underlying HTTP client
    fn request_timeout(&self) -> Duration {
        DEFAULT_REQUEST_TIMEOUT
    }

    /// Validates the configuration before a request is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or credentials are unusable.
    fn validate(&self) -> Result<(), crate::error::ConsoleError>;
}

impl Config for ConsoleConfig {
    fn headers(&self) -> Result<HeaderMap, crate::error::ConsoleError> {
        use crate::error::ConsoleError;

        let mut h = HeaderMap::new();

        if let Some(secret) = &self.api_key {
            let token = secret.expose_secret().trim();
            if !token.is_empty() {
                h.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {token}"))
                        .map_err(|_| ConsoleError::Config("Invalid Authorization header".into()))?,
                );
            }
        }

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn query(&self) -> Vec<(&str, &str)> {
        vec![]
    }

    fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn validate(&self) -> Result<(), crate::error::ConsoleError> {
        use crate::error::ConsoleError;

        let base = self.api_base.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConsoleError::Config(format!(
                "Console base URL must start with http:// or https://, got '{base}'"
            )));
        }
        if let Some(secret) = &self.api_key
            && secret.expose_secret().trim().is_empty()
        {
            return Err(ConsoleError::Config(
                "CONSOLE_API_KEY is set but empty".into(),
            ));
        }
        Ok(())
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
        let _key = EnvGuard::set("CONSOLE_API_KEY", "token-123");
        let _base = EnvGuard::set("CONSOLE_BASE_URL", "https://console.example.com");

        let cfg = ConsoleConfig::new();
        assert_eq!(cfg.api_base(), "https://console.example.com");

        let h = cfg.headers().unwrap();
        assert_eq!(
            h.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer token-123"
        );
    }

    #[test]
    #[serial(env)]
    fn config_defaults_base_url_and_no_auth() {
        let _key = EnvGuard::remove("CONSOLE_API_KEY");
        let _base = EnvGuard::remove("CONSOLE_BASE_URL");

        let cfg = ConsoleConfig::new();
        assert_eq!(cfg.api_base(), CONSOLE_DEFAULT_BASE);
        assert!(cfg.headers().unwrap().is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn url_joins_without_double_slash() {
        let cfg = ConsoleConfig::new().with_api_base("http://host:5000/");
        assert_eq!(cfg.url("/api/tenants"), "http://host:5000/api/tenants");
        assert_eq!(cfg.url("api/products"), "http://host:5000/api/products");
    }

    #[test]
    fn validate_rejects_non_http_base() {
        let cfg = ConsoleConfig::new().with_api_base("localhost:5000");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_key() {
        let cfg = ConsoleConfig::new()
            .with_api_base("http://localhost")
            .with_api_key("   ");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = ConsoleConfig::new().with_api_key("super-secret-token");
        let debug_str = format!("{cfg:?}");

        assert!(!debug_str.contains("super-secret-token"));
        assert!(
            debug_str.contains("[REDACTED]"),
            "Debug output should contain '[REDACTED]', got: {debug_str}"
        );
    }

    #[test]
    fn request_timeout_override() {
        let cfg = ConsoleConfig::new().with_request_timeout(Duration::from_secs(3));
        assert_eq!(Config::request_timeout(&cfg), Duration::from_secs(3));
    }
}
