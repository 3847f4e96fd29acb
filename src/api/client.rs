use reqwest::{Method, StatusCode};
use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::ApiError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

pub fn is_silent() -> bool {
    SILENT.load(Ordering::Relaxed)
}

fn log_output(msg: String) {
    if !is_silent() {
        println!("{}", msg);
    }
}

/// Shared HTTP client for every backend call made by this process. A call
/// that outlives `timeout` fails as a network error.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .user_agent(format!("Usuarios/{}", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(ApiError::from)
}

/// Renders the request as the equivalent curl invocation.
pub fn curl_command(method: &Method, url: &str, body: Option<&Value>) -> String {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method.as_str()).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));

    if let Some(d) = body {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
        let json_str = serde_json::to_string_pretty(d).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!("{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
        ));
    }
    parts.join(" ")
}

pub fn log_request(method: &Method, url: &str, body: Option<&Value>) {
    tracing::debug!(%method, url, ?body, "API Request");
    log_output(format!("Request:\n{}", curl_command(method, url, body)));
}

pub fn log_response(status: StatusCode, body: Option<&[u8]>) {
    tracing::debug!(status = status.as_u16(), "API Response");
    let text = match body {
        Some(bytes) if !bytes.is_empty() => String::from_utf8_lossy(bytes).into_owned(),
        _ => String::new(),
    };
    // Dimmed so the request line stays the focus.
    let response_str = Paint::new(format!("{} {}", status, text)).rgb(100, 100, 100).to_string();
    log_output(format!("Response:\n{}", response_str));
}
