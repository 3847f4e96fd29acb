use std::env;
use std::path::Path;
use std::time::Duration;

use crate::directory::ErrorPolicy;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_default())
}

/// `DIRECTORY_ERROR_POLICY`: `parity` (default) or `unified`.
pub fn get_error_policy() -> ErrorPolicy {
    match env::var("DIRECTORY_ERROR_POLICY") {
        Ok(raw) => ErrorPolicy::parse(&raw).unwrap_or_else(|| {
            tracing::warn!(value = %raw, "Unknown DIRECTORY_ERROR_POLICY, using parity");
            ErrorPolicy::Parity
        }),
        Err(_) => ErrorPolicy::Parity,
    }
}

/// `API_TIMEOUT_SECS`: whole-request timeout for backend calls.
pub fn get_request_timeout() -> Duration {
    let secs = match env::var("API_TIMEOUT_SECS") {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(n) if n > 0 => n,
            _ => {
                tracing::warn!(value = %raw, "Invalid API_TIMEOUT_SECS, using default");
                DEFAULT_REQUEST_TIMEOUT_SECS
            }
        },
        Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
    };
    Duration::from_secs(secs)
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Everything a command needs to reach the backend and serve the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub error_policy: ErrorPolicy,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            api_base_url: get_api_base_url(),
            error_policy: get_error_policy(),
            request_timeout: get_request_timeout(),
        }
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(mut self, api_url: Option<&str>, strict: bool) -> Self {
        if let Some(url) = api_url {
            self.api_base_url = sanitize_base_url(url);
        }
        if strict {
            self.error_policy = ErrorPolicy::Unified;
        }
        self
    }
}
