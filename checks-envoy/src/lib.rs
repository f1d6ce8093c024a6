//! An agent check for [Envoy](https://www.envoyproxy.io/).
//!
//! [`EnvoyCheck`] polls the plaintext stats of an Envoy admin endpoint (`/stats`), translates every stat it
//! knows about into a metric submission and reports whether the endpoint could be reached through the
//! `envoy.can_connect` service check.
//!
//! Raw stat names embed identifiers such as cluster or listener names. These are extracted into tags, so
//! `cluster.upstream_1.upstream_cx_total: 42` is submitted as the monotonic count
//! `envoy.cluster.upstream_cx_total` with value `42` and tag `cluster_name:upstream_1`. Stats that are not
//! recognized are skipped.
//!
//! # Usage
//!
//! ```no_run
//! use checks_base::{Check, RecorderSink};
//! use checks_envoy::{EnvoyCheck, InstanceConfig};
//!
//! let mut config = InstanceConfig::new("http://localhost:8001/stats");
//! config.tags.push("env:prod".to_owned());
//!
//! let check = EnvoyCheck::new(config);
//! check.run(&RecorderSink::new()).expect("stats should be numeric");
//! ```
#![warn(missing_docs)]

mod check;
pub use self::check::{process_stats, EnvoyCheck};

mod config;
pub use self::config::InstanceConfig;

mod metrics;

mod parser;
pub use self::parser::{parse_metric, ParsedMetric, UnknownMetric};

/// Name of the service check reporting whether the stats endpoint could be reached.
pub const SERVICE_CHECK_NAME: &str = "envoy.can_connect";
