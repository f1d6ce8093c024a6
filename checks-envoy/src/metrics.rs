//! Known Envoy statistics.
//!
//! Each entry maps a stat name pattern to the metric type it is submitted as. Segments in braces are variable:
//! they match one or more dotted parts of the raw name and are turned into a tag named after the segment. The
//! canonical metric name is `envoy.` followed by the pattern with its variable segments removed.
//!
//! Entries are tried in order and the first match wins, so patterns that are a more specific form of a later
//! pattern must come first.
use checks_base::MetricType::{self, Gauge, Histogram, MonotonicCount};

pub(crate) const METRIC_PREFIX: &str = "envoy.";

pub(crate) static METRICS: &[(&str, MetricType)] = &[
    // Admin listener, ahead of the generic listener patterns below.
    ("listener.admin.downstream_cx_total", MonotonicCount),
    ("listener.admin.downstream_cx_destroy", MonotonicCount),
    ("listener.admin.downstream_cx_active", Gauge),
    ("listener.admin.downstream_cx_length_ms", Histogram),
    ("listener.admin.downstream_pre_cx_timeout", MonotonicCount),
    ("listener.admin.downstream_pre_cx_active", Gauge),
    ("listener.admin.no_filter_chain_match", MonotonicCount),
    ("listener.admin.http.{stat_prefix}.downstream_rq_1xx", MonotonicCount),
    ("listener.admin.http.{stat_prefix}.downstream_rq_2xx", MonotonicCount),
    ("listener.admin.http.{stat_prefix}.downstream_rq_3xx", MonotonicCount),
    ("listener.admin.http.{stat_prefix}.downstream_rq_4xx", MonotonicCount),
    ("listener.admin.http.{stat_prefix}.downstream_rq_5xx", MonotonicCount),
    ("listener.admin.http.{stat_prefix}.downstream_rq_completed", MonotonicCount),
    // Listeners
    ("listener.{address}.http.{stat_prefix}.downstream_rq_1xx", MonotonicCount),
    ("listener.{address}.http.{stat_prefix}.downstream_rq_2xx", MonotonicCount),
    ("listener.{address}.http.{stat_prefix}.downstream_rq_3xx", MonotonicCount),
    ("listener.{address}.http.{stat_prefix}.downstream_rq_4xx", MonotonicCount),
    ("listener.{address}.http.{stat_prefix}.downstream_rq_5xx", MonotonicCount),
    ("listener.{address}.http.{stat_prefix}.downstream_rq_completed", MonotonicCount),
    ("listener.{address}.ssl.connection_error", MonotonicCount),
    ("listener.{address}.ssl.handshake", MonotonicCount),
    ("listener.{address}.ssl.session_reused", MonotonicCount),
    ("listener.{address}.ssl.no_certificate", MonotonicCount),
    ("listener.{address}.ssl.fail_verify_no_cert", MonotonicCount),
    ("listener.{address}.ssl.fail_verify_error", MonotonicCount),
    ("listener.{address}.ssl.fail_verify_san", MonotonicCount),
    ("listener.{address}.ssl.fail_verify_cert_hash", MonotonicCount),
    ("listener.{address}.downstream_cx_total", MonotonicCount),
    ("listener.{address}.downstream_cx_destroy", MonotonicCount),
    ("listener.{address}.downstream_cx_active", Gauge),
    ("listener.{address}.downstream_cx_length_ms", Histogram),
    ("listener.{address}.downstream_pre_cx_timeout", MonotonicCount),
    ("listener.{address}.downstream_pre_cx_active", Gauge),
    ("listener.{address}.no_filter_chain_match", MonotonicCount),
    // Listener manager
    ("listener_manager.listener_added", MonotonicCount),
    ("listener_manager.listener_modified", MonotonicCount),
    ("listener_manager.listener_removed", MonotonicCount),
    ("listener_manager.listener_create_success", MonotonicCount),
    ("listener_manager.listener_create_failure", MonotonicCount),
    ("listener_manager.total_listeners_warming", Gauge),
    ("listener_manager.total_listeners_active", Gauge),
    ("listener_manager.total_listeners_draining", Gauge),
    ("listener_manager.lds.config_reload", MonotonicCount),
    ("listener_manager.lds.update_attempt", MonotonicCount),
    ("listener_manager.lds.update_success", MonotonicCount),
    ("listener_manager.lds.update_failure", MonotonicCount),
    ("listener_manager.lds.update_rejected", MonotonicCount),
    ("listener_manager.lds.version", Gauge),
    // HTTP connection manager, per user agent and per route configuration first.
    ("http.{stat_prefix}.user_agent.{user_agent}.downstream_cx_total", MonotonicCount),
    ("http.{stat_prefix}.user_agent.{user_agent}.downstream_cx_destroy_remote_active_rq", MonotonicCount),
    ("http.{stat_prefix}.user_agent.{user_agent}.downstream_rq_total", MonotonicCount),
    ("http.{stat_prefix}.rds.{route_config_name}.config_reload", MonotonicCount),
    ("http.{stat_prefix}.rds.{route_config_name}.update_attempt", MonotonicCount),
    ("http.{stat_prefix}.rds.{route_config_name}.update_success", MonotonicCount),
    ("http.{stat_prefix}.rds.{route_config_name}.update_failure", MonotonicCount),
    ("http.{stat_prefix}.rds.{route_config_name}.update_rejected", MonotonicCount),
    ("http.{stat_prefix}.rds.{route_config_name}.version", Gauge),
    ("http.{stat_prefix}.tracing.random_sampling", MonotonicCount),
    ("http.{stat_prefix}.tracing.service_forced", MonotonicCount),
    ("http.{stat_prefix}.tracing.client_enabled", MonotonicCount),
    ("http.{stat_prefix}.tracing.not_traceable", MonotonicCount),
    ("http.{stat_prefix}.tracing.health_check", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_ssl_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_http1_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_websocket_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_http2_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_destroy", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_destroy_remote", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_destroy_local", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_destroy_active_rq", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_destroy_local_active_rq", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_destroy_remote_active_rq", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_active", Gauge),
    ("http.{stat_prefix}.downstream_cx_ssl_active", Gauge),
    ("http.{stat_prefix}.downstream_cx_http1_active", Gauge),
    ("http.{stat_prefix}.downstream_cx_websocket_active", Gauge),
    ("http.{stat_prefix}.downstream_cx_http2_active", Gauge),
    ("http.{stat_prefix}.downstream_cx_protocol_error", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_length_ms", Histogram),
    ("http.{stat_prefix}.downstream_cx_rx_bytes_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_rx_bytes_buffered", Gauge),
    ("http.{stat_prefix}.downstream_cx_tx_bytes_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_tx_bytes_buffered", Gauge),
    ("http.{stat_prefix}.downstream_cx_drain_close", MonotonicCount),
    ("http.{stat_prefix}.downstream_cx_idle_timeout", MonotonicCount),
    ("http.{stat_prefix}.downstream_flow_control_paused_reading_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_flow_control_resumed_reading_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_http1_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_http2_total", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_active", Gauge),
    ("http.{stat_prefix}.downstream_rq_response_before_rq_complete", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_rx_reset", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_tx_reset", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_non_relative_path", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_too_large", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_1xx", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_2xx", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_3xx", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_4xx", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_5xx", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_ws_on_non_ws_route", MonotonicCount),
    ("http.{stat_prefix}.downstream_rq_time", Histogram),
    ("http.{stat_prefix}.downstream_rq_idle_timeout", MonotonicCount),
    ("http.{stat_prefix}.rs_too_large", MonotonicCount),
    ("http.{stat_prefix}.no_route", MonotonicCount),
    ("http.{stat_prefix}.no_cluster", MonotonicCount),
    ("http.{stat_prefix}.rq_redirect", MonotonicCount),
    ("http.{stat_prefix}.rq_total", MonotonicCount),
    ("http.{stat_prefix}.rq_direct_response", MonotonicCount),
    // TCP proxy
    ("tcp.{stat_prefix}.downstream_cx_total", MonotonicCount),
    ("tcp.{stat_prefix}.downstream_cx_no_route", MonotonicCount),
    ("tcp.{stat_prefix}.downstream_cx_tx_bytes_total", MonotonicCount),
    ("tcp.{stat_prefix}.downstream_cx_tx_bytes_buffered", Gauge),
    ("tcp.{stat_prefix}.downstream_cx_rx_bytes_total", MonotonicCount),
    ("tcp.{stat_prefix}.downstream_cx_rx_bytes_buffered", Gauge),
    ("tcp.{stat_prefix}.downstream_flow_control_paused_reading_total", MonotonicCount),
    ("tcp.{stat_prefix}.downstream_flow_control_resumed_reading_total", MonotonicCount),
    ("tcp.{stat_prefix}.idle_timeout", MonotonicCount),
    ("tcp.{stat_prefix}.upstream_flush_total", MonotonicCount),
    ("tcp.{stat_prefix}.upstream_flush_active", Gauge),
    // Virtual clusters
    ("vhost.{virtual_host_name}.vcluster.{virtual_cluster_name}.upstream_rq_1xx", MonotonicCount),
    ("vhost.{virtual_host_name}.vcluster.{virtual_cluster_name}.upstream_rq_2xx", MonotonicCount),
    ("vhost.{virtual_host_name}.vcluster.{virtual_cluster_name}.upstream_rq_3xx", MonotonicCount),
    ("vhost.{virtual_host_name}.vcluster.{virtual_cluster_name}.upstream_rq_4xx", MonotonicCount),
    ("vhost.{virtual_host_name}.vcluster.{virtual_cluster_name}.upstream_rq_5xx", MonotonicCount),
    ("vhost.{virtual_host_name}.vcluster.{virtual_cluster_name}.upstream_rq_time", Histogram),
    // Cluster manager
    ("cluster_manager.cluster_added", MonotonicCount),
    ("cluster_manager.cluster_modified", MonotonicCount),
    ("cluster_manager.cluster_removed", MonotonicCount),
    ("cluster_manager.cluster_updated", MonotonicCount),
    ("cluster_manager.cluster_updated_via_merge", MonotonicCount),
    ("cluster_manager.update_merge_cancelled", MonotonicCount),
    ("cluster_manager.update_out_of_merge_window", MonotonicCount),
    ("cluster_manager.active_clusters", Gauge),
    ("cluster_manager.warming_clusters", Gauge),
    ("cluster_manager.cds.config_reload", MonotonicCount),
    ("cluster_manager.cds.update_attempt", MonotonicCount),
    ("cluster_manager.cds.update_success", MonotonicCount),
    ("cluster_manager.cds.update_failure", MonotonicCount),
    ("cluster_manager.cds.update_rejected", MonotonicCount),
    ("cluster_manager.cds.version", Gauge),
    ("cluster_manager.cds.control_plane.connected_state", Gauge),
    // Clusters: circuit breakers, health checks, outlier detection and TLS first.
    ("cluster.{cluster_name}.circuit_breakers.{priority}.cx_open", Gauge),
    ("cluster.{cluster_name}.circuit_breakers.{priority}.cx_pool_open", Gauge),
    ("cluster.{cluster_name}.circuit_breakers.{priority}.rq_pending_open", Gauge),
    ("cluster.{cluster_name}.circuit_breakers.{priority}.rq_open", Gauge),
    ("cluster.{cluster_name}.circuit_breakers.{priority}.rq_retry_open", Gauge),
    ("cluster.{cluster_name}.circuit_breakers.{priority}.remaining_cx", Gauge),
    ("cluster.{cluster_name}.circuit_breakers.{priority}.remaining_pending", Gauge),
    ("cluster.{cluster_name}.circuit_breakers.{priority}.remaining_rq", Gauge),
    ("cluster.{cluster_name}.circuit_breakers.{priority}.remaining_retries", Gauge),
    ("cluster.{cluster_name}.health_check.attempt", MonotonicCount),
    ("cluster.{cluster_name}.health_check.success", MonotonicCount),
    ("cluster.{cluster_name}.health_check.failure", MonotonicCount),
    ("cluster.{cluster_name}.health_check.passive_failure", MonotonicCount),
    ("cluster.{cluster_name}.health_check.network_failure", MonotonicCount),
    ("cluster.{cluster_name}.health_check.verify_cluster", MonotonicCount),
    ("cluster.{cluster_name}.health_check.healthy", Gauge),
    ("cluster.{cluster_name}.outlier_detection.ejections_enforced_total", MonotonicCount),
    ("cluster.{cluster_name}.outlier_detection.ejections_active", Gauge),
    ("cluster.{cluster_name}.outlier_detection.ejections_overflow", MonotonicCount),
    ("cluster.{cluster_name}.outlier_detection.ejections_enforced_consecutive_5xx", MonotonicCount),
    ("cluster.{cluster_name}.outlier_detection.ejections_detected_consecutive_5xx", MonotonicCount),
    ("cluster.{cluster_name}.outlier_detection.ejections_enforced_success_rate", MonotonicCount),
    ("cluster.{cluster_name}.outlier_detection.ejections_detected_success_rate", MonotonicCount),
    ("cluster.{cluster_name}.outlier_detection.ejections_enforced_consecutive_gateway_failure", MonotonicCount),
    ("cluster.{cluster_name}.outlier_detection.ejections_detected_consecutive_gateway_failure", MonotonicCount),
    ("cluster.{cluster_name}.ssl.connection_error", MonotonicCount),
    ("cluster.{cluster_name}.ssl.handshake", MonotonicCount),
    ("cluster.{cluster_name}.ssl.session_reused", MonotonicCount),
    ("cluster.{cluster_name}.ssl.no_certificate", MonotonicCount),
    ("cluster.{cluster_name}.ssl.fail_verify_no_cert", MonotonicCount),
    ("cluster.{cluster_name}.ssl.fail_verify_error", MonotonicCount),
    ("cluster.{cluster_name}.ssl.fail_verify_san", MonotonicCount),
    ("cluster.{cluster_name}.ssl.fail_verify_cert_hash", MonotonicCount),
    ("cluster.{cluster_name}.ratelimit.ok", MonotonicCount),
    ("cluster.{cluster_name}.ratelimit.error", MonotonicCount),
    ("cluster.{cluster_name}.ratelimit.over_limit", MonotonicCount),
    // Clusters: connections
    ("cluster.{cluster_name}.upstream_cx_total", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_active", Gauge),
    ("cluster.{cluster_name}.upstream_cx_http1_total", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_http2_total", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_connect_fail", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_connect_timeout", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_connect_attempts_exceeded", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_overflow", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_connect_ms", Histogram),
    ("cluster.{cluster_name}.upstream_cx_length_ms", Histogram),
    ("cluster.{cluster_name}.upstream_cx_destroy", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_destroy_local", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_destroy_remote", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_destroy_with_active_rq", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_destroy_local_with_active_rq", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_destroy_remote_with_active_rq", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_close_notify", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_rx_bytes_total", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_rx_bytes_buffered", Gauge),
    ("cluster.{cluster_name}.upstream_cx_tx_bytes_total", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_tx_bytes_buffered", Gauge),
    ("cluster.{cluster_name}.upstream_cx_protocol_error", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_max_requests", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_none_healthy", MonotonicCount),
    ("cluster.{cluster_name}.upstream_cx_idle_timeout", MonotonicCount),
    ("cluster.{cluster_name}.upstream_flow_control_paused_reading_total", MonotonicCount),
    ("cluster.{cluster_name}.upstream_flow_control_resumed_reading_total", MonotonicCount),
    ("cluster.{cluster_name}.upstream_flow_control_backed_up_total", MonotonicCount),
    ("cluster.{cluster_name}.upstream_flow_control_drained_total", MonotonicCount),
    // Clusters: requests by origin, ahead of the totals.
    ("cluster.{cluster_name}.external.upstream_rq_1xx", MonotonicCount),
    ("cluster.{cluster_name}.external.upstream_rq_2xx", MonotonicCount),
    ("cluster.{cluster_name}.external.upstream_rq_3xx", MonotonicCount),
    ("cluster.{cluster_name}.external.upstream_rq_4xx", MonotonicCount),
    ("cluster.{cluster_name}.external.upstream_rq_5xx", MonotonicCount),
    ("cluster.{cluster_name}.external.upstream_rq_time", Histogram),
    ("cluster.{cluster_name}.internal.upstream_rq_1xx", MonotonicCount),
    ("cluster.{cluster_name}.internal.upstream_rq_2xx", MonotonicCount),
    ("cluster.{cluster_name}.internal.upstream_rq_3xx", MonotonicCount),
    ("cluster.{cluster_name}.internal.upstream_rq_4xx", MonotonicCount),
    ("cluster.{cluster_name}.internal.upstream_rq_5xx", MonotonicCount),
    ("cluster.{cluster_name}.internal.upstream_rq_time", Histogram),
    // Clusters: requests
    ("cluster.{cluster_name}.upstream_rq_total", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_active", Gauge),
    ("cluster.{cluster_name}.upstream_rq_pending_total", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_pending_overflow", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_pending_failure_eject", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_pending_active", Gauge),
    ("cluster.{cluster_name}.upstream_rq_cancelled", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_maintenance_mode", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_timeout", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_per_try_timeout", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_rx_reset", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_tx_reset", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_retry", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_retry_success", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_retry_overflow", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_completed", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_1xx", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_2xx", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_3xx", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_4xx", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_5xx", MonotonicCount),
    ("cluster.{cluster_name}.upstream_rq_time", Histogram),
    // Clusters: load balancing and membership
    ("cluster.{cluster_name}.lb_healthy_panic", MonotonicCount),
    ("cluster.{cluster_name}.lb_local_cluster_not_ok", MonotonicCount),
    ("cluster.{cluster_name}.lb_recalculate_zone_structures", MonotonicCount),
    ("cluster.{cluster_name}.lb_zone_cluster_too_small", MonotonicCount),
    ("cluster.{cluster_name}.lb_zone_no_capacity_left", MonotonicCount),
    ("cluster.{cluster_name}.lb_zone_number_differs", MonotonicCount),
    ("cluster.{cluster_name}.lb_zone_routing_all_directly", MonotonicCount),
    ("cluster.{cluster_name}.lb_zone_routing_sampled", MonotonicCount),
    ("cluster.{cluster_name}.lb_zone_routing_cross_zone", MonotonicCount),
    ("cluster.{cluster_name}.lb_subsets_active", Gauge),
    ("cluster.{cluster_name}.lb_subsets_created", MonotonicCount),
    ("cluster.{cluster_name}.lb_subsets_removed", MonotonicCount),
    ("cluster.{cluster_name}.lb_subsets_selected", MonotonicCount),
    ("cluster.{cluster_name}.lb_subsets_fallback", MonotonicCount),
    ("cluster.{cluster_name}.membership_change", MonotonicCount),
    ("cluster.{cluster_name}.membership_healthy", Gauge),
    ("cluster.{cluster_name}.membership_degraded", Gauge),
    ("cluster.{cluster_name}.membership_total", Gauge),
    ("cluster.{cluster_name}.retry_or_shadow_abandoned", MonotonicCount),
    ("cluster.{cluster_name}.config_reload", MonotonicCount),
    ("cluster.{cluster_name}.update_attempt", MonotonicCount),
    ("cluster.{cluster_name}.update_success", MonotonicCount),
    ("cluster.{cluster_name}.update_failure", MonotonicCount),
    ("cluster.{cluster_name}.update_empty", MonotonicCount),
    ("cluster.{cluster_name}.update_no_rebuild", MonotonicCount),
    ("cluster.{cluster_name}.version", Gauge),
    ("cluster.{cluster_name}.max_host_weight", Gauge),
    ("cluster.{cluster_name}.bind_errors", MonotonicCount),
    // Server
    ("server.uptime", Gauge),
    ("server.memory_allocated", Gauge),
    ("server.memory_heap_size", Gauge),
    ("server.live", Gauge),
    ("server.state", Gauge),
    ("server.parent_connections", Gauge),
    ("server.total_connections", Gauge),
    ("server.version", Gauge),
    ("server.concurrency", Gauge),
    ("server.days_until_first_cert_expiring", Gauge),
    ("server.hot_restart_epoch", Gauge),
    ("server.debug_assertion_failures", MonotonicCount),
    ("server.watchdog_miss", MonotonicCount),
    ("server.watchdog_mega_miss", MonotonicCount),
    ("server.initialization_time_ms", Histogram),
    // Runtime
    ("runtime.load_error", MonotonicCount),
    ("runtime.load_success", MonotonicCount),
    ("runtime.num_keys", Gauge),
    ("runtime.num_layers", Gauge),
    ("runtime.admin_overrides_active", Gauge),
    ("runtime.override_dir_exists", MonotonicCount),
    ("runtime.override_dir_not_exists", MonotonicCount),
    ("runtime.deprecated_feature_use", MonotonicCount),
    // File system
    ("filesystem.write_buffered", MonotonicCount),
    ("filesystem.write_completed", MonotonicCount),
    ("filesystem.flushed_by_timer", MonotonicCount),
    ("filesystem.reopen_failed", MonotonicCount),
    ("filesystem.write_total_buffered", Gauge),
    // Stats
    ("stats.overflow", MonotonicCount),
];
