use std::{sync::Arc, time::Duration};

use checks_base::{
    http::StatusCode,
    proxy::ProxySettings,
    testing::{RecordingSink, StubResponse, StubServer, Submission},
    Check, CheckError, MetricType, ServiceCheckStatus,
};
use checks_envoy::{EnvoyCheck, InstanceConfig, SERVICE_CHECK_NAME};
use parking_lot::Mutex;

const STATS: &str = "\
cluster.upstream_1.upstream_cx_total: 42
cluster.upstream_1.upstream_cx_active: 3
cluster.upstream_1.upstream_rq_time: 17
listener.admin.downstream_cx_active: 1
server.uptime: 3600
";

fn tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|tag| (*tag).to_owned()).collect()
}

fn instance(url: String) -> InstanceConfig {
    let mut config = InstanceConfig::new(url);
    config.tags = tags(&["env:prod"]);
    config.timeout = 5;
    config
}

fn run(config: InstanceConfig) -> (Result<(), CheckError>, RecordingSink) {
    let sink = RecordingSink::new();
    let result = EnvoyCheck::new(config).run(&sink);
    (result, sink)
}

fn single_service_check(sink: &RecordingSink) -> (ServiceCheckStatus, Option<String>) {
    let checks = sink.service_checks();
    assert_eq!(checks.len(), 1, "expected exactly one service check: {checks:?}");
    let (name, status, message) = checks.into_iter().next().unwrap();
    assert_eq!(name, SERVICE_CHECK_NAME);
    (status, message)
}

#[test]
fn reports_metrics_and_ok() {
    let server = StubServer::serving(STATS).unwrap();

    let (result, sink) = run(instance(server.url("/stats")));
    result.unwrap();

    assert_eq!(
        sink.metrics(),
        vec![
            (
                MetricType::MonotonicCount,
                "envoy.cluster.upstream_cx_total".to_owned(),
                42,
                tags(&["cluster_name:upstream_1", "env:prod"]),
            ),
            (
                MetricType::Gauge,
                "envoy.cluster.upstream_cx_active".to_owned(),
                3,
                tags(&["cluster_name:upstream_1", "env:prod"]),
            ),
            (
                MetricType::Histogram,
                "envoy.cluster.upstream_rq_time".to_owned(),
                17,
                tags(&["cluster_name:upstream_1", "env:prod"]),
            ),
            (MetricType::Gauge, "envoy.listener.admin.downstream_cx_active".to_owned(), 1, tags(&["env:prod"])),
            (MetricType::Gauge, "envoy.server.uptime".to_owned(), 3600, tags(&["env:prod"])),
        ]
    );

    assert_eq!(single_service_check(&sink), (ServiceCheckStatus::Ok, None));

    // The service check comes last and carries the custom tags.
    let submissions = sink.submissions();
    assert_eq!(
        submissions.last(),
        Some(&Submission::ServiceCheck {
            name: SERVICE_CHECK_NAME.to_owned(),
            status: ServiceCheckStatus::Ok,
            tags: tags(&["env:prod"]),
            message: None,
        })
    );
}

#[test]
fn requests_the_configured_path() {
    let paths = Arc::new(Mutex::new(Vec::new()));
    let server = {
        let paths = Arc::clone(&paths);
        StubServer::start(move |req| {
            paths.lock().push(req.path.clone());
            StubResponse::ok("server.live: 1\n")
        })
        .unwrap()
    };

    let (result, sink) = run(instance(server.url("/stats")));
    result.unwrap();

    // Exactly one request per run, no retries.
    assert_eq!(*paths.lock(), vec!["/stats".to_owned()]);
    assert_eq!(sink.metrics().len(), 1);
}

#[test]
fn timeout_is_critical() {
    let server =
        StubServer::start(|_| StubResponse::ok(STATS).with_delay(Duration::from_secs(3))).unwrap();
    let url = server.url("/stats");

    let mut config = instance(url.clone());
    config.timeout = 1;
    let (result, sink) = run(config);
    result.unwrap();

    assert!(sink.metrics().is_empty());
    let (status, message) = single_service_check(&sink);
    assert_eq!(status, ServiceCheckStatus::Critical);
    assert_eq!(message, Some(format!("Envoy endpoint `{url}` timed out after 1 seconds")));
}

#[test]
fn connection_failure_is_critical() {
    let url = {
        let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).unwrap();
        format!("http://{}/stats", listener.local_addr().unwrap())
    };

    let (result, sink) = run(instance(url.clone()));
    result.unwrap();

    assert!(sink.metrics().is_empty());
    let (status, message) = single_service_check(&sink);
    assert_eq!(status, ServiceCheckStatus::Critical);
    assert_eq!(message, Some(format!("Error accessing Envoy endpoint `{url}`")));
}

#[test]
fn invalid_url_is_critical() {
    let (result, sink) = run(instance("http://envoy stats".to_owned()));
    result.unwrap();

    let (status, message) = single_service_check(&sink);
    assert_eq!(status, ServiceCheckStatus::Critical);
    assert_eq!(message, Some("Error accessing Envoy endpoint `http://envoy stats`".to_owned()));
}

#[test]
fn non_200_status_is_critical() {
    let server = StubServer::start(|_| StubResponse::status(StatusCode::SERVICE_UNAVAILABLE)).unwrap();
    let url = server.url("/stats");

    let (result, sink) = run(instance(url.clone()));
    result.unwrap();

    assert!(sink.metrics().is_empty());
    let (status, message) = single_service_check(&sink);
    assert_eq!(status, ServiceCheckStatus::Critical);
    assert_eq!(message, Some(format!("Envoy endpoint `{url}` responded with HTTP status code 503")));

    // Custom tags are attached to failures too.
    match &sink.submissions()[0] {
        Submission::ServiceCheck { tags: submitted, .. } => assert_eq!(submitted, &tags(&["env:prod"])),
        other => panic!("unexpected submission: {other:?}"),
    }
}

#[test]
fn non_utf8_body_is_critical() {
    let server = StubServer::serving(vec![0xff, 0xfe, b'\n']).unwrap();

    let (result, sink) = run(instance(server.url("/stats")));
    result.unwrap();

    assert!(sink.metrics().is_empty());
    assert_eq!(single_service_check(&sink).0, ServiceCheckStatus::Critical);
}

#[test]
fn unknown_metrics_are_skipped() {
    let server = StubServer::serving(
        "unknown.metric.xyz: 1\nserver.live: 1\ncluster.a.not_yet_supported: 7\nserver.uptime: 10\n",
    )
    .unwrap();

    let (result, sink) = run(instance(server.url("/stats")));
    result.unwrap();

    let names = sink.metrics().into_iter().map(|(_, name, _, _)| name).collect::<Vec<_>>();
    assert_eq!(names, vec!["envoy.server.live", "envoy.server.uptime"]);
    assert_eq!(single_service_check(&sink).0, ServiceCheckStatus::Ok);
}

#[test]
fn malformed_lines_are_skipped() {
    let server = StubServer::serving("not a stat line\n\nserver.live:1\nserver.uptime: 10\n").unwrap();

    let (result, sink) = run(instance(server.url("/stats")));
    result.unwrap();

    assert_eq!(sink.metrics().len(), 1);
    assert_eq!(single_service_check(&sink).0, ServiceCheckStatus::Ok);
}

#[test]
fn empty_body_is_ok() {
    let server = StubServer::serving("").unwrap();

    let (result, sink) = run(instance(server.url("/stats")));
    result.unwrap();

    assert!(sink.metrics().is_empty());
    assert_eq!(single_service_check(&sink), (ServiceCheckStatus::Ok, None));
}

#[test]
fn invalid_value_aborts_without_service_check() {
    let server = StubServer::serving("server.live: 1\nserver.uptime: NaN\nserver.version: 3\n").unwrap();

    let (result, sink) = run(instance(server.url("/stats")));

    match result {
        Err(CheckError::InvalidValue { metric, value, .. }) => {
            assert_eq!(metric, "server.uptime");
            assert_eq!(value, "NaN");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(sink.metrics().len(), 1);
    assert!(sink.service_checks().is_empty());
}

#[test]
fn basic_auth_requires_both_credentials() {
    let server = StubServer::start(|req| match req.authorization.as_deref() {
        Some("Basic YWRtaW46czNjcjN0") => StubResponse::ok("server.live: 1\n"),
        _ => StubResponse::status(StatusCode::UNAUTHORIZED),
    })
    .unwrap();

    let mut config = instance(server.url("/stats"));
    config.username = Some("admin".to_owned());
    config.password = Some("s3cr3t".to_owned());
    let (result, sink) = run(config.clone());
    result.unwrap();
    assert_eq!(single_service_check(&sink).0, ServiceCheckStatus::Ok);
    assert_eq!(sink.metrics().len(), 1);

    config.password = None;
    let (result, sink) = run(config);
    result.unwrap();
    let (status, message) = single_service_check(&sink);
    assert_eq!(status, ServiceCheckStatus::Critical);
    assert!(message.unwrap().ends_with("responded with HTTP status code 401"));
}

#[test]
fn skip_proxy_ignores_agent_proxy() {
    let server = StubServer::serving("server.live: 1\n").unwrap();
    // Nothing listens here, so going through the proxy would fail.
    let agent_proxy = ProxySettings { http: Some("http://127.0.0.1:1".to_owned()), ..Default::default() };

    let mut config = instance(server.url("/stats"));
    let sink = RecordingSink::new();
    EnvoyCheck::new(config.clone()).with_agent_proxy(agent_proxy.clone()).run(&sink).unwrap();
    assert_eq!(single_service_check(&sink).0, ServiceCheckStatus::Critical);

    config.skip_proxy = true;
    let sink = RecordingSink::new();
    EnvoyCheck::new(config).with_agent_proxy(agent_proxy).run(&sink).unwrap();
    assert_eq!(single_service_check(&sink).0, ServiceCheckStatus::Ok);
}

#[test]
fn instance_from_yaml() {
    let server = StubServer::serving(STATS).unwrap();
    let yaml = format!("stats_url: {}\ntags:\n  - role:edge\n", server.url("/stats"));
    let config: InstanceConfig = serde_yaml::from_str(&yaml).unwrap();

    let check = EnvoyCheck::new(config);
    assert_eq!(check.name(), "envoy");
    assert_eq!(check.config().timeout, 20);

    let sink = RecordingSink::new();
    check.run(&sink).unwrap();
    assert_eq!(sink.metrics().len(), 5);
    assert!(sink.metrics().iter().all(|(_, _, _, tags)| tags.last().map(String::as_str) == Some("role:edge")));
}

#[test]
fn http_targets_go_through_forward_proxy() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let proxy = {
        let seen = Arc::clone(&seen);
        StubServer::start(move |req| {
            seen.lock().push((req.method.to_string(), req.target.clone()));
            match req.method.as_str() {
                "CONNECT" => StubResponse::status(StatusCode::FORBIDDEN),
                _ => StubResponse::ok("server.live: 1\n"),
            }
        })
        .unwrap()
    };
    let agent_proxy = ProxySettings { http: Some(proxy.url("")), ..Default::default() };

    let sink = RecordingSink::new();
    EnvoyCheck::new(instance("http://envoy.internal:8001/stats".to_owned()))
        .with_agent_proxy(agent_proxy)
        .run(&sink)
        .unwrap();

    assert_eq!(single_service_check(&sink).0, ServiceCheckStatus::Ok);
    assert_eq!(sink.metrics().len(), 1);
    assert_eq!(*seen.lock(), vec![("GET".to_owned(), "http://envoy.internal:8001/stats".to_owned())]);
}

#[test]
fn self_signed_endpoint_requires_disabled_validation() {
    let server = StubServer::start_tls(|_| StubResponse::ok(STATS)).unwrap();
    let url = server.url("/stats");

    let (result, sink) = run(instance(url.clone()));
    result.unwrap();
    assert!(sink.metrics().is_empty());
    let (status, message) = single_service_check(&sink);
    assert_eq!(status, ServiceCheckStatus::Critical);
    assert_eq!(message, Some(format!("Error accessing Envoy endpoint `{url}`")));

    let mut config = instance(url);
    config.disable_ssl_validation = true;
    let (result, sink) = run(config);
    result.unwrap();
    assert_eq!(sink.metrics().len(), 5);
    assert_eq!(single_service_check(&sink), (ServiceCheckStatus::Ok, None));
}
