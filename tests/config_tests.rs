use std::env;
use std::time::Duration;

use usuarios::config::{self, Settings, DEFAULT_REQUEST_TIMEOUT_SECS};
use usuarios::directory::ErrorPolicy;

#[test]
fn test_sanitize_base_url() {
    let cases = [
        ("http://users.internal:8081/", "http://users.internal:8081"),
        ("http://users.internal:8081///", "http://users.internal:8081"),
        ("  http://users.internal:8081  ", "http://users.internal:8081"),
        ("http://gateway:8080/directorio/", "http://gateway:8080/directorio"),
        ("", "http://localhost:8081"),
        ("  / ", "http://localhost:8081"),
    ];
    for (raw, expected) in cases {
        assert_eq!(config::sanitize_base_url(raw), expected, "input {:?}", raw);
    }
}

#[test]
fn test_base_url_with_path_prefix_keeps_it_in_endpoint() {
    let settings = Settings {
        api_base_url: config::DEFAULT_API_BASE_URL.into(),
        error_policy: ErrorPolicy::Parity,
        request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
    }
    .with_overrides(Some("http://gateway:8080/directorio/"), false);
    let client = usuarios::api::UsuariosClient::new(reqwest::Client::new(), settings.api_base_url);

    assert_eq!(client.collection_url(), "http://gateway:8080/directorio/api/usuarios");
}

// Environment variables are process-wide, so every case that touches them
// lives in this one test.
#[test]
fn test_settings_from_env() {
    env::remove_var("API_BASE_URL");
    env::remove_var("DIRECTORY_ERROR_POLICY");
    env::remove_var("API_TIMEOUT_SECS");
    let defaults = Settings::from_env();
    assert_eq!(defaults.api_base_url, "http://localhost:8081");
    assert_eq!(defaults.error_policy, ErrorPolicy::Parity);
    assert_eq!(defaults.request_timeout, Duration::from_secs(30));

    env::set_var("API_BASE_URL", "http://users.internal:9000/");
    env::set_var("DIRECTORY_ERROR_POLICY", "unified");
    env::set_var("API_TIMEOUT_SECS", " 5 ");
    let from_env = Settings::from_env();
    assert_eq!(from_env.api_base_url, "http://users.internal:9000");
    assert_eq!(from_env.error_policy, ErrorPolicy::Unified);
    assert_eq!(from_env.request_timeout, Duration::from_secs(5));

    env::set_var("DIRECTORY_ERROR_POLICY", "sometimes");
    assert_eq!(config::get_error_policy(), ErrorPolicy::Parity);

    for bad in ["0", "soon", "-3"] {
        env::set_var("API_TIMEOUT_SECS", bad);
        assert_eq!(config::get_request_timeout(), Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    }

    // Clean up
    env::remove_var("API_BASE_URL");
    env::remove_var("DIRECTORY_ERROR_POLICY");
    env::remove_var("API_TIMEOUT_SECS");
}

#[test]
fn test_flags_override_environment() {
    let settings = Settings {
        api_base_url: "http://localhost:8081".into(),
        error_policy: ErrorPolicy::Parity,
        request_timeout: Duration::from_secs(10),
    }
    .with_overrides(Some("http://other:8081/"), true);

    assert_eq!(settings.api_base_url, "http://other:8081");
    assert_eq!(settings.error_policy, ErrorPolicy::Unified);
    assert_eq!(settings.request_timeout, Duration::from_secs(10));

    let untouched = settings.clone().with_overrides(None, false);
    assert_eq!(untouched, settings);
}
