use std::fmt;

/// Metric type, selecting the aggregation semantics a submitted value gets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MetricType {
    /// Point-in-time value; the last submission wins.
    Gauge,

    /// Delta added to a counter.
    Count,

    /// Raw value of a monotonically increasing counter; the backend derives the delta between runs.
    MonotonicCount,

    /// Value that is already a per-second rate.
    Rate,

    /// Sample fed into a distribution.
    Histogram,
}

impl MetricType {
    /// Returns the submission method name for this metric type, e.g. `monotonic_count`.
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricType::Gauge => "gauge",
            MetricType::Count => "count",
            MetricType::MonotonicCount => "monotonic_count",
            MetricType::Rate => "rate",
            MetricType::Histogram => "histogram",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health of a check target.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum ServiceCheckStatus {
    /// Target reachable and well-formed.
    Ok = 0,

    /// Target reachable but degraded.
    Warning = 1,

    /// Target unreachable or misbehaving.
    Critical = 2,

    /// Health could not be determined.
    Unknown = 3,
}

impl ServiceCheckStatus {
    /// Returns the numeric status code, as used on the wire by DogStatsD.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ServiceCheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceCheckStatus::Ok => "OK",
            ServiceCheckStatus::Warning => "WARNING",
            ServiceCheckStatus::Critical => "CRITICAL",
            ServiceCheckStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Destination for everything a check reports.
///
/// Tags are `key:value` strings and are passed through in the order given.
pub trait CheckSink {
    /// Submits a gauge.
    fn gauge(&self, name: &str, value: i64, tags: &[String]);

    /// Submits a count delta.
    fn count(&self, name: &str, value: i64, tags: &[String]);

    /// Submits the raw value of a monotonically increasing counter.
    fn monotonic_count(&self, name: &str, value: i64, tags: &[String]);

    /// Submits a rate.
    fn rate(&self, name: &str, value: i64, tags: &[String]);

    /// Submits a histogram sample.
    fn histogram(&self, name: &str, value: i64, tags: &[String]);

    /// Reports the health of the check target.
    fn service_check(&self, name: &str, status: ServiceCheckStatus, tags: &[String], message: Option<&str>);

    /// Submits a metric through the method matching `kind`.
    fn submit(&self, kind: MetricType, name: &str, value: i64, tags: &[String]) {
        match kind {
            MetricType::Gauge => self.gauge(name, value, tags),
            MetricType::Count => self.count(name, value, tags),
            MetricType::MonotonicCount => self.monotonic_count(name, value, tags),
            MetricType::Rate => self.rate(name, value, tags),
            MetricType::Histogram => self.histogram(name, value, tags),
        }
    }
}
