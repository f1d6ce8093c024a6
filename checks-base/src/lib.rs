//! Shared building blocks for agent checks.
//!
//! A check polls a single target, turns what it finds into metric submissions and reports exactly one
//! service check describing whether the target could be reached. Everything a check needs from the host
//! lives here:
//!
//! - [`Check`], the capability every check implements.
//! - [`CheckSink`], the interface metrics and service checks are submitted through.
//! - [`http`], a blocking single-request HTTP fetcher with basic auth, TLS verification toggle, proxy
//!   support and a timeout.
//! - [`proxy`], resolution of agent-level and instance-level proxy settings.
//! - [`RecorderSink`], a sink that forwards submissions to the global [`metrics`] recorder.
//!
//! # Usage
//!
//! ```no_run
//! use checks_base::{Check, CheckError, CheckSink, ServiceCheckStatus};
//!
//! struct AlwaysUp;
//!
//! impl Check for AlwaysUp {
//!     fn name(&self) -> &'static str {
//!         "always_up"
//!     }
//!
//!     fn run(&self, sink: &dyn CheckSink) -> Result<(), CheckError> {
//!         sink.gauge("always_up.value", 1, &[]);
//!         sink.service_check("always_up.can_connect", ServiceCheckStatus::Ok, &[], None);
//!         Ok(())
//!     }
//! }
//!
//! AlwaysUp.run(&checks_base::RecorderSink::new()).expect("check should not fail");
//! ```
//!
//! # Features
//!
//! ## `testing`
//!
//! Enables the [`testing`] module, which provides an in-memory sink and a stub HTTP server for exercising
//! checks end to end.
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

mod check;
pub use self::check::{Check, CheckError};

pub mod http;
pub mod proxy;

mod recorder;
pub use self::recorder::RecorderSink;

mod sink;
pub use self::sink::{CheckSink, MetricType, ServiceCheckStatus};

#[cfg(any(test, feature = "testing"))]
#[cfg_attr(docsrs, doc(cfg(feature = "testing")))]
pub mod testing;
