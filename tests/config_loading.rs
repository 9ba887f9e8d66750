//! Configuration file loading.

use std::io::Write;

use student_api::config::{load_config, ConfigError};

const VALID: &str = r#"
env = "local"
storage_path = "storage/storage.db"

[http_server]
address = "127.0.0.1:8082"
"#;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_and_env_override() {
    let file = write_config(VALID);

    std::env::remove_var("ENV");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.env, "local");
    assert_eq!(config.http_server.address, "127.0.0.1:8082");

    std::env::set_var("ENV", "production");
    let config = load_config(file.path()).unwrap();
    std::env::remove_var("ENV");
    assert_eq!(config.env, "production");
}

#[test]
fn test_invalid_values_are_all_reported() {
    let file = write_config(
        r#"
env = "local"
storage_path = ""

[http_server]
address = "not-an-address"
"#,
    );

    match load_config(file.path()) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].field, "storage_path");
            assert_eq!(errors[1].field, "http_server.address");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_unparseable_file() {
    let file = write_config("env = [unterminated");
    assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
}
