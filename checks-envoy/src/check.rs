use checks_base::{
    http::{self, FetchError},
    proxy::ProxySettings,
    Check, CheckError, CheckSink, ServiceCheckStatus,
};
use tracing::{debug, error, warn};

use crate::{config::InstanceConfig, parser::parse_metric, SERVICE_CHECK_NAME};

/// Polls an Envoy admin stats endpoint.
///
/// Each run issues a single GET against the configured `stats_url`, submits every recognized stat line and
/// reports [`SERVICE_CHECK_NAME`]:
///
/// - `CRITICAL` if the endpoint cannot be reached, times out, or answers with anything but `200 OK`, in which
///   case no metrics are submitted;
/// - `OK` once the whole body has been processed, even if it held no recognized stats.
#[derive(Clone, Debug)]
pub struct EnvoyCheck {
    config: InstanceConfig,
    agent_proxy: ProxySettings,
}

impl EnvoyCheck {
    /// Creates a check for the given instance, with no agent-level proxy.
    pub fn new(config: InstanceConfig) -> Self {
        EnvoyCheck { config, agent_proxy: ProxySettings::default() }
    }

    /// Sets the agent-level proxy settings the instance's own proxy options are resolved against.
    #[must_use]
    pub fn with_agent_proxy(mut self, agent_proxy: ProxySettings) -> Self {
        self.agent_proxy = agent_proxy;
        self
    }

    /// Returns the instance configuration.
    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    fn critical(&self, sink: &dyn CheckSink, message: &str) {
        sink.service_check(SERVICE_CHECK_NAME, ServiceCheckStatus::Critical, &self.config.tags, Some(message));
    }

    fn fetch_failed(&self, sink: &dyn CheckSink, e: &FetchError) {
        let url = &self.config.stats_url;
        let message = if e.is_timeout() {
            format!("Envoy endpoint `{url}` timed out after {} seconds", self.config.effective_timeout())
        } else {
            format!("Error accessing Envoy endpoint `{url}`")
        };

        error!(%url, error = %e, "{message}");
        self.critical(sink, &message);
    }
}

impl Check for EnvoyCheck {
    fn name(&self) -> &'static str {
        "envoy"
    }

    fn run(&self, sink: &dyn CheckSink) -> Result<(), CheckError> {
        let url = &self.config.stats_url;

        let response = match self
            .config
            .request_options(&self.agent_proxy)
            .and_then(|options| http::get(url, &options))
        {
            Ok(response) => response,
            Err(e) => {
                self.fetch_failed(sink, &e);
                return Ok(());
            }
        };

        if response.status != http::StatusCode::OK {
            let message = format!(
                "Envoy endpoint `{url}` responded with HTTP status code {}",
                response.status.as_u16()
            );
            warn!(%url, status = response.status.as_u16(), "{message}");
            self.critical(sink, &message);
            return Ok(());
        }

        let body = match std::str::from_utf8(&response.body) {
            Ok(body) => body,
            Err(e) => {
                let message = format!("Envoy endpoint `{url}` returned a body that is not valid UTF-8");
                error!(%url, error = %e, "{message}");
                self.critical(sink, &message);
                return Ok(());
            }
        };

        let submitted = process_stats(body, &self.config.tags, sink)?;
        debug!(%url, submitted, "Processed Envoy stats.");

        sink.service_check(SERVICE_CHECK_NAME, ServiceCheckStatus::Ok, &self.config.tags, None);
        Ok(())
    }
}

/// Submits every recognized stat line of `body` to `sink`, returning how many metrics were submitted.
///
/// Lines that are not of the form `<name>: <value>` are skipped silently, and stats with an unknown name are
/// skipped with a debug log. `custom_tags` are appended to the tags derived from each stat name.
///
/// # Errors
///
/// If a stat line carries a value that is not an integer, [`CheckError::InvalidValue`] is returned. Metrics from
/// earlier lines have already been submitted at that point.
pub fn process_stats(body: &str, custom_tags: &[String], sink: &dyn CheckSink) -> Result<usize, CheckError> {
    let mut submitted = 0;

    for line in body.lines() {
        let mut fields = line.split(": ");
        let (Some(raw_name), Some(raw_value), None) = (fields.next(), fields.next(), fields.next()) else {
            continue;
        };

        let value = raw_value.trim().parse::<i64>().map_err(|source| CheckError::InvalidValue {
            metric: raw_name.to_owned(),
            value: raw_value.to_owned(),
            source,
        })?;

        let metric = match parse_metric(raw_name) {
            Ok(metric) => metric,
            Err(e) => {
                debug!("Unknown metric `{}`", e.name);
                continue;
            }
        };

        let mut tags = metric.tags;
        tags.extend_from_slice(custom_tags);
        sink.submit(metric.kind, &metric.name, value, &tags);
        submitted += 1;
    }

    Ok(submitted)
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Arc};

    use checks_base::{testing::RecordingSink, CheckError, MetricType};
    use parking_lot::Mutex;
    use proptest::prelude::*;

    use super::process_stats;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs<F: FnOnce()>(f: F) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    fn tags(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|tag| (*tag).to_owned()).collect()
    }

    #[test]
    fn submits_recognized_lines() {
        let sink = RecordingSink::new();
        let body = "cluster.upstream_1.upstream_cx_total: 42\nserver.uptime: 3600\nserver.initialization_time_ms: 12\n";

        let submitted = process_stats(body, &tags(&["env:prod"]), &sink).unwrap();

        assert_eq!(submitted, 3);
        assert_eq!(
            sink.metrics(),
            vec![
                (
                    MetricType::MonotonicCount,
                    "envoy.cluster.upstream_cx_total".to_owned(),
                    42,
                    tags(&["cluster_name:upstream_1", "env:prod"]),
                ),
                (MetricType::Gauge, "envoy.server.uptime".to_owned(), 3600, tags(&["env:prod"])),
                (MetricType::Histogram, "envoy.server.initialization_time_ms".to_owned(), 12, tags(&["env:prod"])),
            ]
        );
        assert!(sink.service_checks().is_empty());
    }

    #[test]
    fn skips_malformed_lines_silently() {
        let sink = RecordingSink::new();
        let body = "not a stat line\n\nserver.live:1\na: b: c\nserver.live: 1";

        let logs = capture_logs(|| {
            assert_eq!(process_stats(body, &[], &sink).unwrap(), 1);
        });

        assert_eq!(sink.metrics(), vec![(MetricType::Gauge, "envoy.server.live".to_owned(), 1, vec![])]);
        assert!(logs.is_empty(), "unexpected logs: {logs}");
    }

    #[test]
    fn logs_unknown_metrics_at_debug() {
        let sink = RecordingSink::new();
        let body = "unknown.metric.xyz: 1\nserver.live: 1\n";

        let logs = capture_logs(|| {
            assert_eq!(process_stats(body, &[], &sink).unwrap(), 1);
        });

        assert!(logs.contains("DEBUG"), "{logs}");
        assert!(logs.contains("Unknown metric `unknown.metric.xyz`"), "{logs}");
        assert_eq!(sink.metrics().len(), 1);
    }

    #[test]
    fn trims_values() {
        let sink = RecordingSink::new();
        process_stats("server.live:  1 \r\nserver.uptime: -5", &[], &sink).unwrap();

        let values = sink.metrics().into_iter().map(|(_, _, value, _)| value).collect::<Vec<_>>();
        assert_eq!(values, vec![1, -5]);
    }

    #[test]
    fn invalid_value_is_fatal() {
        let sink = RecordingSink::new();
        let body = "server.live: 1\nserver.uptime: soon\nserver.version: 7";

        let error = process_stats(body, &[], &sink).unwrap_err();

        let CheckError::InvalidValue { metric, value, .. } = &error;
        assert_eq!(metric, "server.uptime");
        assert_eq!(value, "soon");
        assert!(error.to_string().starts_with("invalid value `soon` for metric `server.uptime`"));
        // Lines before the failure stay submitted.
        assert_eq!(sink.metrics().len(), 1);
    }

    #[test]
    fn unknown_metric_values_must_still_be_integers() {
        let sink = RecordingSink::new();
        assert!(process_stats("unknown.metric: 1.5", &[], &sink).is_err());
        assert!(sink.metrics().is_empty());
    }

    proptest! {
        #[test]
        fn custom_tags_follow_derived_tags(
            cluster in "[0-9][a-z0-9_]{0,10}",
            custom in prop::collection::vec("[a-z]{1,6}:[a-z0-9]{1,6}", 0..5),
            value in any::<i64>(),
        ) {
            let sink = RecordingSink::new();
            let body = format!("cluster.{cluster}.upstream_rq_2xx: {value}");

            prop_assert_eq!(process_stats(&body, &custom, &sink).unwrap(), 1);

            let mut expected = vec![format!("cluster_name:{cluster}")];
            expected.extend(custom.iter().cloned());
            let metrics = sink.metrics();
            prop_assert_eq!(metrics.len(), 1);
            prop_assert_eq!(metrics[0].2, value);
            prop_assert_eq!(&metrics[0].3, &expected);
        }
    }
}
