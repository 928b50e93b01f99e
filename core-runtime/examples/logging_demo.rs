//! Logging system demonstration
//!
//! This example shows how to use the logging infrastructure in different modes.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run --example logging_demo
//!
//! # JSON format
//! cargo run --example logging_demo -- json
//!
//! # Compact format
//! cargo run --example logging_demo -- compact
//!
//! # With custom filter
//! cargo run --example logging_demo -- pretty "core_runtime=trace"
//! ```

use core_runtime::logging::{
    init_logging, redact_if_sensitive, strip_query, LogFormat, LogLevel, LoggingConfig,
};
use std::env;
use tracing::{debug, error, info, instrument, span, trace, warn, Level};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let format = if args.len() > 1 {
        match args[1].as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Pretty,
        }
    } else {
        LogFormat::default()
    };

    let filter = args.get(2).cloned();

    // Initialize logging
    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace)
        .with_spans(true)
        .with_target(true);

    if let Some(f) = filter {
        config = config.with_filter(f);
    }

    init_logging(config).expect("Failed to initialize logging");

    info!("=== Logging System Demo ===");
    info!(format = ?format, "Logging initialized");

    // Demonstrate different log levels
    demo_log_levels();

    // Demonstrate structured logging
    demo_structured_logging();

    // Demonstrate spans for tracing
    demo_spans().await;

    // Demonstrate credential redaction
    demo_redaction();

    // Demonstrate instrumentation
    demo_instrumentation().await;

    info!("=== Demo Complete ===");
}

fn demo_log_levels() {
    let span = span!(Level::INFO, "log_levels");
    let _enter = span.enter();

    trace!("This is a TRACE level log");
    debug!("This is a DEBUG level log");
    info!("This is an INFO level log");
    warn!("This is a WARN level log");
    error!("This is an ERROR level log");
}

fn demo_structured_logging() {
    let span = span!(Level::INFO, "structured_logging");
    let _enter = span.enter();

    info!("Simple message without fields");

    info!(
        flow_id = "5f3a9c2e",
        mode = "popup",
        poll_interval_ms = 1000,
        "Login flow information"
    );

    info!(
        reconcile_count = 3,
        signed_in = true,
        subscriber_count = 2,
        "Widget status"
    );
}

async fn demo_spans() {
    let span = span!(Level::INFO, "login_flow", mode = "iframe");
    let _enter = span.enter();

    info!("Starting login flow");

    {
        let inner_span = span!(Level::DEBUG, "show_dialog");
        let _inner = inner_span.enter();

        debug!(title = "Login", "Login dialog shown");
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }

    {
        let inner_span = span!(Level::DEBUG, "reconcile");
        let _inner = inner_span.enter();

        debug!(status = 200, "User-info request resolved");
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }

    info!(signed_in = true, "Login flow completed");
}

fn demo_redaction() {
    let span = span!(Level::INFO, "redaction");
    let _enter = span.enter();

    // These values will be automatically redacted by our helper
    let header = "Basic dXNlcjpodW50ZXIy";
    let email = "user@example.com";
    let login_url = "https://auth.example.org/login?server=https%3A%2F%2Fswish.example.org";

    info!(
        authorization = %redact_if_sensitive("authorization", header),
        user = %redact_if_sensitive("user", email),
        url = %strip_query(login_url),
        "Sensitive data example"
    );

    // The safest field is one that never enters the log stream
    info!("Authentication successful for user");
    // Instead of: info!(authorization = header, "Auth successful")
}

#[instrument]
async fn demo_instrumentation() {
    info!("Instrumented function automatically creates spans");

    let endpoints = vec!["user_info", "user_profile", ".force_logout"];
    resolve_endpoints(&endpoints).await;
}

#[instrument(fields(count = endpoints.len()))]
async fn resolve_endpoints(endpoints: &[&str]) {
    debug!("Resolving endpoint locations");

    for (idx, endpoint) in endpoints.iter().enumerate() {
        resolve_endpoint(idx, endpoint).await;
    }

    info!("All endpoint locations resolved");
}

#[instrument(fields(endpoint_id = idx))]
async fn resolve_endpoint(idx: usize, endpoint: &str) {
    trace!(endpoint = %endpoint, "Resolving individual endpoint");
    tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
}
