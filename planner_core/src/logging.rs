//! Tracing setup for the planner service.
//!
//! `RUST_LOG` wins when set. Otherwise the service logs at the requested level
//! and HTTP request spans from `tower_http` are shown at debug.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directive appended to every default filter
const HTTP_TRACE_DIRECTIVE: &str = "tower_http=debug";

/// Start logging for the server binary at INFO
pub fn init() {
    init_with_level("info")
}

/// Start logging with `default_level` for planner output
pub fn init_with_level(default_level: &str) {
    tracing_subscriber::registry()
        .with(service_filter(default_level))
        .with(fmt::layer().compact().with_target(false))
        .init();
}

fn service_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter_directives(default_level)))
}

fn default_filter_directives(default_level: &str) -> String {
    format!("{},{}", default_level, HTTP_TRACE_DIRECTIVE)
}

/// Route planner logs into the test harness output
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("planner_core=debug"))
        .try_init();
}
