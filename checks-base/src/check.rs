use std::num::ParseIntError;

use thiserror::Error;

use crate::CheckSink;

/// Errors that abort a check run.
///
/// Connectivity and protocol failures are not errors from the perspective of the host: a check reports them
/// through a critical service check and returns normally. Only conditions the check has no policy for end up
/// here.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A stat line carried a value that is not an integer.
    #[error("invalid value `{value}` for metric `{metric}`: {source}")]
    InvalidValue {
        /// Raw metric name of the offending line.
        metric: String,

        /// Raw value of the offending line.
        value: String,

        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// A single pollable check.
///
/// Implementations hold their own instance configuration and share no mutable state between runs, so a host is
/// free to run distinct instances concurrently.
pub trait Check {
    /// Short name of the check, used by the host for logging.
    fn name(&self) -> &'static str;

    /// Polls the target once, submitting metrics and exactly one service check to `sink`.
    ///
    /// # Errors
    ///
    /// If the run hits a condition that cannot be reported as a service check, an error is returned and no
    /// service check is submitted. Metrics submitted before the failure are not retracted.
    fn run(&self, sink: &dyn CheckSink) -> Result<(), CheckError>;
}
