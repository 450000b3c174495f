use chip_tracker::config::{AppConfig, ConfigError};
use config::{Config, FileFormat};

fn from_yaml(yaml: &str) -> Result<AppConfig, ConfigError> {
    let cfg = Config::builder()
        .add_source(config::File::from_str(yaml, FileFormat::Yaml))
        .build()
        .expect("Failed to build config");
    AppConfig::from_config(cfg)
}

#[test]
fn test_defaults_apply_to_empty_file() {
    let app = from_yaml("{}").expect("empty config is valid");
    assert_eq!(app.database_url, None);
    assert_eq!(app.listen_addr, "0.0.0.0:8080");
    assert!(app.alarms.enabled);
    assert_eq!(app.alarms.poll_interval_secs, 60);
}

#[test]
fn test_full_config_deserialization() {
    let app = from_yaml(
        r#"
database_url: "postgres://localhost/chips"
listen_addr: "127.0.0.1:3000"
alarms:
  enabled: false
  poll_interval_secs: 15
"#,
    )
    .expect("valid config");
    assert_eq!(app.database_url.as_deref(), Some("postgres://localhost/chips"));
    assert_eq!(app.listen_addr, "127.0.0.1:3000");
    assert!(!app.alarms.enabled);
    assert_eq!(app.alarms.poll_interval_secs, 15);
}

#[test]
fn test_partial_alarm_section_keeps_defaults() {
    let app = from_yaml("alarms:\n  poll_interval_secs: 5\n").expect("valid config");
    assert!(app.alarms.enabled);
    assert_eq!(app.alarms.poll_interval_secs, 5);
}

#[test]
fn test_zero_poll_interval_is_rejected() {
    let err = from_yaml("alarms:\n  poll_interval_secs: 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("poll_interval_secs"));
}

#[test]
fn test_blank_database_url_is_rejected() {
    let err = from_yaml("database_url: \"  \"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_wrong_type_is_a_build_error() {
    let err = from_yaml("alarms:\n  poll_interval_secs: soon\n").unwrap_err();
    assert!(matches!(err, ConfigError::Build(_)));
}
