use std::io::Write;

use serial_test::serial;

use super::*;

const ENV_KEYS: [&str; 5] = [
    "RAGBRIDGE_APP_URL",
    "RAGBRIDGE_APP_KEY",
    "RAGBRIDGE_TIMEOUT",
    "RAGBRIDGE_CONNECT_TIMEOUT",
    "RAGBRIDGE_ACCEPT_INVALID_CERTS",
];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
#[serial]
fn missing_file_uses_defaults() {
    clear_env();
    let config = Config::load(Path::new("/nonexistent/ragbridge.toml")).unwrap();
    assert!(config.credentials.app_url.is_none());
    assert!(config.credentials.app_key.is_none());
    assert!(!config.credentials.is_complete());
    assert_eq!(config.client.timeout, 30);
    assert_eq!(config.tools.retrieval.page_size, 30);
}

#[test]
#[serial]
fn parses_full_file() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[credentials]
app_url = "https://ragflow.internal"
app_key = "ragflow-key"

[client]
timeout = 5
accept_invalid_certs = true

[tools.retrieval]
page_size = 12
similarity_threshold = 0.5
"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(
        config.credentials.app_url.as_deref(),
        Some("https://ragflow.internal")
    );
    assert_eq!(
        config.credentials.app_key.as_ref().map(|k| k.expose()),
        Some("ragflow-key")
    );
    assert!(config.credentials.is_complete());
    assert_eq!(config.client.timeout, 5);
    assert_eq!(config.client.connect_timeout, 10);
    assert!(config.client.accept_invalid_certs);
    assert_eq!(config.tools.retrieval.page_size, 12);
    assert_eq!(config.tools.retrieval.top_k, 1024);
    assert!((config.tools.retrieval.similarity_threshold - 0.5).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn invalid_toml_is_error() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[credentials\napp_url = ").unwrap();
    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config file"));
}

#[test]
#[serial]
fn env_overrides_credentials_and_client() {
    clear_env();
    unsafe {
        std::env::set_var("RAGBRIDGE_APP_URL", "http://env-host");
        std::env::set_var("RAGBRIDGE_APP_KEY", "env-key");
        std::env::set_var("RAGBRIDGE_TIMEOUT", "7");
        std::env::set_var("RAGBRIDGE_CONNECT_TIMEOUT", "3");
        std::env::set_var("RAGBRIDGE_ACCEPT_INVALID_CERTS", "true");
    }
    let config = Config::load(Path::new("/nonexistent/ragbridge.toml")).unwrap();
    clear_env();

    assert_eq!(config.credentials.app_url.as_deref(), Some("http://env-host"));
    assert_eq!(
        config.credentials.app_key.as_ref().map(|k| k.expose()),
        Some("env-key")
    );
    assert_eq!(config.client.timeout, 7);
    assert_eq!(config.client.connect_timeout, 3);
    assert!(config.client.accept_invalid_certs);
}

#[test]
#[serial]
fn invalid_env_values_are_ignored() {
    clear_env();
    unsafe {
        std::env::set_var("RAGBRIDGE_TIMEOUT", "soon");
        std::env::set_var("RAGBRIDGE_ACCEPT_INVALID_CERTS", "maybe");
    }
    let config = Config::load(Path::new("/nonexistent/ragbridge.toml")).unwrap();
    clear_env();

    assert_eq!(config.client.timeout, 30);
    assert!(!config.client.accept_invalid_certs);
}

#[test]
fn incomplete_credentials() {
    let only_url = CredentialsConfig {
        app_url: Some("http://h".to_owned()),
        app_key: None,
    };
    assert!(!only_url.is_complete());
    let empty_key = CredentialsConfig {
        app_url: Some("http://h".to_owned()),
        app_key: Some(ragbridge_client::Secret::new("")),
    };
    assert!(!empty_key.is_complete());
}

#[test]
fn debug_does_not_leak_key() {
    let creds = CredentialsConfig {
        app_url: Some("http://h".to_owned()),
        app_key: Some(ragbridge_client::Secret::new("top-secret")),
    };
    assert!(!format!("{creds:?}").contains("top-secret"));
}

#[test]
#[serial]
fn zero_timeouts_are_rejected() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[client]\ntimeout = 0\nconnect_timeout = 0\n").unwrap();
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.client.timeout, 30);
    assert_eq!(config.client.connect_timeout, 10);

    unsafe { std::env::set_var("RAGBRIDGE_TIMEOUT", "0") };
    let config = Config::load(Path::new("/nonexistent/ragbridge.toml")).unwrap();
    clear_env();
    assert_eq!(config.client.timeout, 30);
}
