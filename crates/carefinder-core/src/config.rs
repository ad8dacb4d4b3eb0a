// crates/carefinder-core/src/config.rs

//! # Client Configuration
//!
//! The backend base URL is an environment-level setting, resolved once per
//! process. There is no runtime reconfiguration.

#[cfg(feature = "client")]
use crate::error::{CareError, Result};
#[cfg(feature = "client")]
use once_cell::sync::OnceCell;
#[cfg(feature = "client")]
use reqwest::Url;
use std::time::Duration;

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "CAREFINDER_API_BASE_URL";
/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "CAREFINDER_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

/// Path of the facilities endpoint, relative to the base URL.
pub const FACILITIES_PATH: &str = "/api/facilities";

/// Limit the interactive UI starts with.
pub const DEFAULT_LIMIT: u32 = 150;
/// Limit the fetch client uses when the caller has no preference.
pub const CLIENT_DEFAULT_LIMIT: u32 = 100;
/// Limits offered to the user. The client itself does not enforce these.
pub const LIMIT_OPTIONS: [u32; 4] = [50, 100, 150, 200];

#[cfg(feature = "client")]
static GLOBAL_CONFIG: OnceCell<ClientConfig> = OnceCell::new();

#[cfg(feature = "client")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slashes, e.g. `http://localhost:8000`.
    pub base_url: String,
    pub timeout: Duration,
}

#[cfg(feature = "client")]
impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(feature = "client")]
impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from [`BASE_URL_ENV`] / [`TIMEOUT_ENV`], falling back to defaults
    /// for unset or blank variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => normalize_base_url(&raw)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let timeout = match lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    CareError::Config(format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"))
                })?;
                if secs == 0 {
                    return Err(CareError::Config(format!("{TIMEOUT_ENV} must be positive")));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self { base_url, timeout })
    }

    /// Process-wide configuration, read from the environment on first use.
    pub fn global() -> Result<&'static ClientConfig> {
        GLOBAL_CONFIG.get_or_try_init(Self::from_env)
    }

    /// Full URL of the facilities endpoint.
    pub fn facilities_url(&self) -> String {
        format!("{}{}", self.base_url, FACILITIES_PATH)
    }
}

/// Parse an http(s) base URL and drop trailing slashes.
///
/// Scheme and host are case-insensitive; the result is in the canonical
/// lowercase form `Url` produces.
#[cfg(feature = "client")]
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let invalid = |reason: String| CareError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "expected an http:// or https:// URL, got scheme '{}'",
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".into()));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(all(test, feature = "client"))]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let cfg = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.timeout, Duration::from_secs(25));
        assert_eq!(cfg.facilities_url(), "http://localhost:8000/api/facilities");
    }

    #[test]
    fn test_trailing_slashes_are_stripped() {
        let cfg =
            ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "https://api.example.org///")]))
                .unwrap();
        assert_eq!(cfg.base_url, "https://api.example.org");
    }

    #[test]
    fn test_blank_env_falls_back_to_default() {
        let cfg = ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "  ")])).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_timeout_override_and_validation() {
        let cfg = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "5")])).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(5));

        assert!(ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")])).is_err());
    }

    #[test]
    fn test_scheme_and_host_are_case_insensitive() {
        assert_eq!(
            normalize_base_url("HTTP://Example.ORG:8000/").unwrap(),
            "http://example.org:8000"
        );
        let cfg = ClientConfig::new("Https://kpk.example.org/api/").unwrap();
        assert_eq!(cfg.facilities_url(), "https://kpk.example.org/api/api/facilities");
    }

    #[test]
    fn test_rejects_urls_without_scheme() {
        assert!(normalize_base_url("localhost:8000").is_err());
        assert!(normalize_base_url("ftp://example.org").is_err());
        assert!(normalize_base_url("http://").is_err());
    }
}
