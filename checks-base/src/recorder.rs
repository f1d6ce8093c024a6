use metrics::{Key, Label, Level, Metadata};
use tracing::warn;

use crate::{CheckSink, ServiceCheckStatus};

static METADATA: Metadata<'static> =
    Metadata::new(module_path!(), Level::INFO, Some(module_path!()));

/// A sink that forwards submissions to the global [`metrics`] recorder.
///
/// Metric types map onto `metrics` primitives as follows:
///
/// - gauges and rates set a gauge
/// - counts increment a counter
/// - monotonic counts set a counter to the absolute value
/// - histograms record into a histogram
///
/// Tags of the form `key:value` become labels. A tag without a colon becomes a label with an empty value.
///
/// `metrics` has no notion of service checks, so they are recorded as a gauge named after the service check,
/// holding the numeric status code. Non-OK statuses are additionally logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecorderSink {
    _priv: (),
}

impl RecorderSink {
    /// Creates a new [`RecorderSink`].
    pub const fn new() -> Self {
        RecorderSink { _priv: () }
    }
}

impl CheckSink for RecorderSink {
    fn gauge(&self, name: &str, value: i64, tags: &[String]) {
        let key = key_from_parts(name, tags);
        metrics::with_recorder(|recorder| recorder.register_gauge(&key, &METADATA).set(value as f64));
    }

    fn count(&self, name: &str, value: i64, tags: &[String]) {
        let key = key_from_parts(name, tags);
        let value = u64::try_from(value).unwrap_or_default();
        metrics::with_recorder(|recorder| recorder.register_counter(&key, &METADATA).increment(value));
    }

    fn monotonic_count(&self, name: &str, value: i64, tags: &[String]) {
        let key = key_from_parts(name, tags);
        let value = u64::try_from(value).unwrap_or_default();
        metrics::with_recorder(|recorder| recorder.register_counter(&key, &METADATA).absolute(value));
    }

    fn rate(&self, name: &str, value: i64, tags: &[String]) {
        self.gauge(name, value, tags);
    }

    fn histogram(&self, name: &str, value: i64, tags: &[String]) {
        let key = key_from_parts(name, tags);
        metrics::with_recorder(|recorder| {
            recorder.register_histogram(&key, &METADATA).record(value as f64);
        });
    }

    fn service_check(&self, name: &str, status: ServiceCheckStatus, tags: &[String], message: Option<&str>) {
        if status != ServiceCheckStatus::Ok {
            warn!(service_check = name, %status, reason = message.unwrap_or_default(), "service check failing");
        }

        self.gauge(name, i64::from(status.code()), tags);
    }
}

fn key_from_parts(name: &str, tags: &[String]) -> Key {
    let labels = tags.iter().map(|tag| label_from_tag(tag)).collect::<Vec<_>>();
    Key::from_parts(name.to_owned(), labels)
}

fn label_from_tag(tag: &str) -> Label {
    match tag.split_once(':') {
        Some((key, value)) => Label::new(key.to_owned(), value.to_owned()),
        None => Label::new(tag.to_owned(), String::new()),
    }
}
