use tempodash::config::Config;
use tempodash::error::TempoError;

#[test]
fn load_reads_and_validates_a_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempodash.yaml");
    std::fs::write(
        &path,
        "upstream:\n  base_url: https://example.org/api\n  timeout_secs: 5\nweb:\n  port: 9005\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.upstream.base_url, "https://example.org/api");
    assert_eq!(config.upstream.timeout_secs, 5);
    assert_eq!(config.web.port, 9005);
    assert_eq!(config.web.host, "127.0.0.1");
}

#[test]
fn load_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempodash.yaml");
    std::fs::write(&path, "upstream:\n  base_url: ''\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, TempoError::Validation { .. }));
}

#[test]
fn load_rejects_malformed_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempodash.yaml");
    std::fs::write(&path, "upstream: [not: a: mapping\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, TempoError::Serialization { .. }));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.yaml");
    let config = Config::load_or_default(&path).unwrap();
    assert_eq!(config.upstream.base_url, "https://www.api-couleur-tempo.fr/api");
    assert!(config.validate().is_ok());
}

#[test]
fn missing_file_with_load_is_a_config_error() {
    let err = Config::load("/nonexistent/tempodash.yaml").unwrap_err();
    assert!(matches!(err, TempoError::Config { .. }));
}
