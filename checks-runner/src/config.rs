use std::{fs, path::Path, time::Duration};

use checks_base::proxy::ProxySettings;
use checks_envoy::InstanceConfig;
use metrics_exporter_dogstatsd::BuildError;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_MIN_COLLECTION_INTERVAL_SECS: u64 = 15;

/// Errors that stop the runner.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file `{path}`: {source}")]
    ReadConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid.
    #[error("invalid configuration file `{path}`: {source}")]
    ParseConfig {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The configuration file declares no instances.
    #[error("configuration file `{0}` has no instances")]
    NoInstances(String),

    /// The DogStatsD exporter could not be set up.
    #[error("failed to install DogStatsD exporter: {0}")]
    Exporter(#[from] BuildError),
}

/// Options shared by every instance of a check.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct InitConfig {
    /// Seconds between two runs of the instances.
    #[serde(default)]
    pub min_collection_interval: Option<u64>,

    /// Proxy entries overriding the ones read from the environment.
    #[serde(default)]
    pub proxy: Option<ProxySettings>,
}

/// A check configuration file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CheckConfig {
    #[serde(default)]
    pub init_config: Option<InitConfig>,

    #[serde(default)]
    pub instances: Vec<InstanceConfig>,
}

impl CheckConfig {
    /// Loads and validates the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, RunnerError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path)
            .map_err(|source| RunnerError::ReadConfig { path: display.clone(), source })?;

        Self::parse(&contents, &display)
    }

    fn parse(contents: &str, path: &str) -> Result<Self, RunnerError> {
        let config: CheckConfig = serde_yaml::from_str(contents)
            .map_err(|source| RunnerError::ParseConfig { path: path.to_owned(), source })?;

        if config.instances.is_empty() {
            return Err(RunnerError::NoInstances(path.to_owned()));
        }

        Ok(config)
    }

    /// Time between two collection runs.
    pub fn collection_interval(&self) -> Duration {
        let secs = self
            .init_config
            .as_ref()
            .and_then(|init| init.min_collection_interval)
            .unwrap_or(DEFAULT_MIN_COLLECTION_INTERVAL_SECS);
        Duration::from_secs(secs.max(1))
    }

    /// Agent-level proxy settings: `env` with the entries of `init_config.proxy` taking precedence.
    pub fn agent_proxy(&self, env: &ProxySettings) -> ProxySettings {
        match self.init_config.as_ref().and_then(|init| init.proxy.as_ref()) {
            Some(overrides) => env.merged(overrides),
            None => env.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use checks_base::proxy::ProxySettings;

    use super::{CheckConfig, RunnerError};

    const CONFIG: &str = r#"
init_config:
  min_collection_interval: 30
  proxy:
    http: http://init-proxy:3128

instances:
  - stats_url: http://localhost:8001/stats
    tags:
      - env:prod
  - stats_url: https://edge.internal:8001/stats
    username: admin
    password: s3cr3t
    disable_ssl_validation: true
    timeout: 5
"#;

    #[test]
    fn parses_instances() {
        let config = CheckConfig::parse(CONFIG, "envoy.yaml").unwrap();

        assert_eq!(config.instances.len(), 2);
        assert_eq!(config.instances[0].tags, vec!["env:prod"]);
        assert_eq!(config.instances[0].timeout, 20);
        assert_eq!(config.instances[1].credentials(), Some(("admin", "s3cr3t")));
        assert_eq!(config.collection_interval(), Duration::from_secs(30));
    }

    #[test]
    fn defaults() {
        let config = CheckConfig::parse("instances:\n  - stats_url: http://localhost:8001/stats\n", "envoy.yaml")
            .unwrap();

        assert!(config.init_config.is_none());
        assert_eq!(config.collection_interval(), Duration::from_secs(15));

        let env = ProxySettings { https: Some("http://env-proxy:3129".to_owned()), ..Default::default() };
        assert_eq!(config.agent_proxy(&env), env);
    }

    #[test]
    fn init_proxy_overrides_environment() {
        let config = CheckConfig::parse(CONFIG, "envoy.yaml").unwrap();
        let env = ProxySettings {
            http: Some("http://env-proxy:3128".to_owned()),
            https: Some("http://env-proxy:3129".to_owned()),
            no_proxy: vec!["localhost".to_owned()],
        };

        let proxy = config.agent_proxy(&env);
        assert_eq!(proxy.http.as_deref(), Some("http://init-proxy:3128"));
        assert_eq!(proxy.https.as_deref(), Some("http://env-proxy:3129"));
        assert_eq!(proxy.no_proxy, vec!["localhost"]);
    }

    #[test]
    fn rejects_invalid_files() {
        assert!(matches!(
            CheckConfig::parse("instances: []\n", "envoy.yaml"),
            Err(RunnerError::NoInstances(path)) if path == "envoy.yaml"
        ));
        assert!(matches!(
            CheckConfig::parse("instances:\n  - tags: [a]\n", "envoy.yaml"),
            Err(RunnerError::ParseConfig { .. })
        ));
        assert!(matches!(
            CheckConfig::load(std::path::Path::new("/nonexistent/envoy.yaml")),
            Err(RunnerError::ReadConfig { .. })
        ));
    }
}
