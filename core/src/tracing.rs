//! Tracing utilities for request and query-state observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event with the method, URL and header count.
///
/// ```ignore
/// pgrest_trace_request!(request.method, &request.url, request.headers.len());
/// ```
#[macro_export]
macro_rules! pgrest_trace_request {
    ($method:expr, $url:expr, $header_count:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(method = %$method, url = %$url, headers = $header_count, "pgrest.request");
    };
}

/// Emit a debug-level tracing event with the response status and body size.
#[macro_export]
macro_rules! pgrest_trace_response {
    ($status:expr, $bytes:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(status = $status, bytes = $bytes, "pgrest.response");
    };
}

/// Emit a trace-level event for query-state lifecycle (clear, dispatch).
///
/// ```ignore
/// pgrest_trace_state!("clear", "users");
/// ```
#[macro_export]
macro_rules! pgrest_trace_state {
    ($event:literal, $table:expr) => {
        #[cfg(feature = "tracing")]
        tracing::trace!(event = $event, table = %$table, "pgrest.state");
    };
}
