/*!
 * Dispatch Tracing
 * Structured tracing for signal dispatch using the tracing crate
 *
 * Features:
 * - Trace ID per raised event for log correlation
 * - JSON-formatted logs for structured parsing
 * - Slow dispatch detection
 *
 * Logs are written to stderr; stdout belongs to the program.
 */

use crate::core::limits::SLOW_DISPATCH_THRESHOLD;
use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// `json` selects JSON output (see `DemoConfig::trace_json`).
/// RUST_LOG sets the log level (default: warn).
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Generate a unique trace ID for dispatch correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one raised event and all of its receivers
pub struct DispatchSpan {
    span: tracing::Span,
    start: Instant,
    event: String,
    trace_id: String,
}

impl DispatchSpan {
    pub fn new(event: &str) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::DEBUG,
            "dispatch",
            trace_id = %trace_id,
            event = event,
            receivers = tracing::field::Empty,
            duration_us = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            event: event.to_string(),
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Record how many receivers the dispatch covers
    pub fn record_receivers(&self, count: usize) {
        self.span.record("receivers", count as u64);
    }

    pub fn record_success(&self) {
        self.span.record("result", "success");
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }

    /// Enter the span so receiver logs nest under it
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for DispatchSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();

        if duration > SLOW_DISPATCH_THRESHOLD {
            self.span.record("duration_ms", duration.as_millis() as u64);
            warn!(
                trace_id = %self.trace_id,
                event = %self.event,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow dispatch detected"
            );
        } else {
            self.span.record("duration_us", duration.as_micros() as u64);
            debug!(
                trace_id = %self.trace_id,
                event = %self.event,
                duration_us = duration.as_micros() as u64,
                "dispatch completed"
            );
        }
    }
}
