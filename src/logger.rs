//! Terminal formatting of upstream exchanges with configurable verbosity.
//!
//! - Minimal: one-liner nginx-style
//! - Compact: request/response arrow pair
//! - Verbose: block with separators

use crate::config::LogVerbosity;

const SEPARATOR: &str = "────────────────────────────────────────";

/// One relayed call to the upstream router.
#[derive(Debug, Clone)]
pub struct UpstreamExchange<'a> {
    pub method: &'a str,
    pub url: &'a str,
    /// Upstream status, if a response arrived.
    pub status: Option<u16>,
    pub elapsed_ms: u64,
    pub body_bytes: usize,
    /// Failure kind, if the relay failed.
    pub failure: Option<&'static str>,
}

/// Format duration in human-readable form.
fn format_duration(ms: u64) -> String {
    if ms >= 1000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{}ms", ms)
    }
}

/// Extract path from URL.
fn extract_path(url: &str) -> &str {
    url.find("://")
        .and_then(|i| url[i + 3..].find('/').map(|j| &url[i + 3 + j..]))
        .unwrap_or(url)
}

fn status_text(exchange: &UpstreamExchange<'_>) -> String {
    match (exchange.status, exchange.failure) {
        (Some(status), None) => format!("{} OK", status),
        (_, Some(kind)) => format!("FAILED {}", kind),
        (None, None) => "pending".to_string(),
    }
}

/// Format an exchange for terminal output.
pub fn format_exchange(exchange: &UpstreamExchange<'_>, verbosity: LogVerbosity) -> String {
    let path = extract_path(exchange.url);
    let duration = format_duration(exchange.elapsed_ms);

    match verbosity {
        LogVerbosity::Minimal => format!(
            "{} {} {} {}",
            exchange.method,
            path,
            exchange
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| exchange.failure.unwrap_or("-").to_string()),
            duration
        ),
        LogVerbosity::Compact => format!(
            "→ {} {}\n← {} ({}, {} bytes)",
            exchange.method,
            path,
            status_text(exchange),
            duration,
            exchange.body_bytes
        ),
        LogVerbosity::Verbose => format!(
            "{SEPARATOR}\n\
             {method} {url}\n\
             Status: {status}\n\
             Timing: {duration} total\n\
             Body: {bytes} bytes\n\
             {SEPARATOR}",
            method = exchange.method,
            url = exchange.url,
            status = status_text(exchange),
            duration = duration,
            bytes = exchange.body_bytes,
        ),
    }
}
