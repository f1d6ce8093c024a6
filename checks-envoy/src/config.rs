use std::time::Duration;

use checks_base::{
    http::{FetchError, RequestOptions},
    proxy::ProxySettings,
};
use serde::{de::Error as _, Deserialize, Deserializer};

const DEFAULT_TIMEOUT_SECS: u64 = 20;
const MIN_TIMEOUT_SECS: u64 = 1;

/// Configuration of a single Envoy check instance.
///
/// Deserializes from the instance mapping of a check configuration file. Keys not listed here are ignored, so
/// host-level instance options can live alongside.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct InstanceConfig {
    /// URL of the Envoy admin stats endpoint, e.g. `http://localhost:8001/stats`.
    pub stats_url: String,

    /// Tags appended to every metric and to the service check.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Basic authentication user name. Only used together with `password`.
    #[serde(default)]
    pub username: Option<String>,

    /// Basic authentication password. Only used together with `username`.
    #[serde(default)]
    pub password: Option<String>,

    /// Skips verification of the endpoint's TLS certificate.
    #[serde(default)]
    pub disable_ssl_validation: bool,

    /// Request timeout, in seconds.
    ///
    /// Accepts integers, floats (truncated) and numeric strings. Values below one second are raised to one
    /// second when the request is made.
    #[serde(default = "default_timeout", deserialize_with = "deserialize_timeout")]
    pub timeout: u64,

    /// Proxy entries overriding the agent-level proxy settings.
    #[serde(default)]
    pub proxy: Option<ProxySettings>,

    /// Contacts the endpoint directly, ignoring any proxy settings.
    #[serde(default)]
    pub skip_proxy: bool,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn deserialize_timeout<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimeout {
        Integer(u64),
        Float(f64),
        Text(String),
    }

    let secs = match RawTimeout::deserialize(deserializer)? {
        RawTimeout::Integer(secs) => Some(secs),
        RawTimeout::Float(secs) => whole_secs(secs),
        RawTimeout::Text(text) => {
            let text = text.trim();
            text.parse::<u64>().ok().or_else(|| text.parse::<f64>().ok().and_then(whole_secs))
        }
    };

    secs.ok_or_else(|| D::Error::custom("timeout must be a non-negative number of seconds"))
}

fn whole_secs(secs: f64) -> Option<u64> {
    (secs.is_finite() && secs >= 0.0).then(|| secs.trunc() as u64)
}

impl InstanceConfig {
    /// Creates a configuration for `stats_url` with every other option at its default.
    pub fn new<S: Into<String>>(stats_url: S) -> Self {
        InstanceConfig {
            stats_url: stats_url.into(),
            tags: Vec::new(),
            username: None,
            password: None,
            disable_ssl_validation: false,
            timeout: DEFAULT_TIMEOUT_SECS,
            proxy: None,
            skip_proxy: false,
        }
    }

    /// Returns the basic authentication credentials, if both a non-empty user name and password are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }

    /// Returns the timeout applied to the stats request, in seconds.
    pub fn effective_timeout(&self) -> u64 {
        self.timeout.max(MIN_TIMEOUT_SECS)
    }

    /// Builds the options for the stats request, resolving the proxy against `agent_proxy`.
    ///
    /// # Errors
    ///
    /// If the stats URL or a proxy URL cannot be parsed, an error variant will be returned.
    pub fn request_options(&self, agent_proxy: &ProxySettings) -> Result<RequestOptions, FetchError> {
        let mut options = RequestOptions::new()
            .with_timeout(Duration::from_secs(self.effective_timeout()))
            .with_tls_verification(!self.disable_ssl_validation);

        if let Some((username, password)) = self.credentials() {
            options = options.with_basic_auth(username, password);
        }

        if !self.skip_proxy {
            let settings = match &self.proxy {
                Some(overrides) => agent_proxy.merged(overrides),
                None => agent_proxy.clone(),
            };
            options = options.with_proxy(settings.resolve_url(&self.stats_url)?);
        }

        Ok(options)
    }
}
