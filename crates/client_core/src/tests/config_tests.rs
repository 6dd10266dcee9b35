use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_config(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("bestsellers_settings_test_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn falls_back_to_defaults_without_file_or_env() {
    let settings = load_settings_from(Path::new("/nonexistent/bestsellers.toml"), no_env);
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.request_timeout_secs, 30);
    assert!(!settings.has_api_key());
}

#[test]
fn file_values_apply_and_env_wins_over_file() {
    let path = temp_config(
        "api_key = \"from-file\"\nbase_url = \"http://localhost:9000\"\nrequest_timeout_secs = 5\n",
    );

    let from_file = load_settings_from(&path, no_env);
    assert_eq!(from_file.api_key, "from-file");
    assert_eq!(from_file.base_url, "http://localhost:9000");
    assert_eq!(from_file.request_timeout(), Some(Duration::from_secs(5)));

    let with_env = load_settings_from(&path, |name| match name {
        "NYT_API_KEY" => Some("legacy-key".to_string()),
        "APP__API_KEY" => Some("env-key".to_string()),
        "APP__REQUEST_TIMEOUT_SECS" => Some("0".to_string()),
        _ => None,
    });
    assert_eq!(with_env.api_key, "env-key");
    assert_eq!(with_env.base_url, "http://localhost:9000");
    assert_eq!(with_env.request_timeout(), None);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn ignores_unparseable_timeout_override() {
    let settings = load_settings_from(Path::new("/nonexistent/bestsellers.toml"), |name| {
        (name == "APP__REQUEST_TIMEOUT_SECS").then(|| "soon".to_string())
    });
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn normalizes_base_url() {
    assert_eq!(
        normalize_base_url("http://127.0.0.1:8080/svc/books/v3/").expect("valid"),
        "http://127.0.0.1:8080/svc/books/v3"
    );
    assert_eq!(normalize_base_url("  ").expect("default"), DEFAULT_BASE_URL);
    assert!(normalize_base_url("ftp://example.com").is_err());
    assert!(normalize_base_url("not a url").is_err());
}
