//! Configuration resolution tests
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate ZTR_STORE_* or SUPABASE_* are marked with #[serial].

use serial_test::serial;
use std::env;
use std::io::Write;
use ztr_common::config::{
    TomlConfig, STORE_KEY_ENV, STORE_URL_ENV, SUPABASE_KEY_ENV, SUPABASE_URL_ENV,
};
use ztr_common::grading::Grade;

fn clear_env() {
    for name in [STORE_URL_ENV, STORE_KEY_ENV, SUPABASE_URL_ENV, SUPABASE_KEY_ENV] {
        env::remove_var(name);
    }
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
#[serial]
fn test_cli_argument_wins() {
    clear_env();
    env::set_var(STORE_URL_ENV, "https://env.example");
    env::set_var(STORE_KEY_ENV, "env-key");

    let file = TomlConfig {
        store_url: Some("https://file.example".to_string()),
        store_key: Some("file-key".to_string()),
        grade_bands: vec![],
    };

    let resolved = file
        .resolve_store(Some("https://cli.example"), Some("cli-key"))
        .unwrap();
    assert_eq!(resolved.url, "https://cli.example");
    assert_eq!(resolved.api_key, "cli-key");

    clear_env();
}

#[test]
#[serial]
fn test_environment_beats_config_file() {
    clear_env();
    env::set_var(STORE_URL_ENV, "https://env.example");
    env::set_var(SUPABASE_KEY_ENV, "anon-key");

    let file = TomlConfig {
        store_url: Some("https://file.example".to_string()),
        store_key: Some("file-key".to_string()),
        grade_bands: vec![],
    };

    let resolved = file.resolve_store(None, None).unwrap();
    assert_eq!(resolved.url, "https://env.example");
    assert_eq!(resolved.api_key, "anon-key");

    clear_env();
}

#[test]
#[serial]
fn test_ztr_variable_preferred_over_supabase_name() {
    clear_env();
    env::set_var(STORE_URL_ENV, "https://ztr.example");
    env::set_var(SUPABASE_URL_ENV, "https://supabase.example");
    env::set_var(STORE_KEY_ENV, "k");

    let resolved = TomlConfig::default().resolve_store(None, None).unwrap();
    assert_eq!(resolved.url, "https://ztr.example");

    clear_env();
}

#[test]
#[serial]
fn test_config_file_fallback_and_blank_values_ignored() {
    clear_env();
    env::set_var(STORE_URL_ENV, "   ");

    let file = TomlConfig {
        store_url: Some("https://file.example".to_string()),
        store_key: Some("file-key".to_string()),
        grade_bands: vec![],
    };

    let resolved = file.resolve_store(Some(""), None).unwrap();
    assert_eq!(resolved.url, "https://file.example");
    assert_eq!(resolved.api_key, "file-key");

    clear_env();
}

#[test]
#[serial]
fn test_missing_key_is_config_error() {
    clear_env();

    let err = TomlConfig::default()
        .resolve_store(Some("https://cli.example"), None)
        .unwrap_err();
    assert!(err.to_string().contains("Store key not configured"));
}

#[test]
fn test_load_explicit_file() {
    let file = write_config(
        r#"
store_url = "https://project.supabase.co"
store_key = "secret"

[[grade_bands]]
min_percentage = 50.0
grade = "A"
message = "Pass"
show_confetti = true

[[grade_bands]]
min_percentage = 0.0
grade = "F"
message = "Fail"
"#,
    );

    let config = TomlConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.store_url.as_deref(), Some("https://project.supabase.co"));
    assert_eq!(config.grade_bands.len(), 2);
    assert!(!config.grade_bands[1].show_confetti);

    let table = config.grade_table().unwrap();
    assert_eq!(table.evaluate(55, 100).unwrap().grade, Grade::A);
    assert_eq!(table.evaluate(45, 100).unwrap().message, "Fail");
}

#[test]
fn test_missing_explicit_file_is_error() {
    let err = TomlConfig::load(Some(std::path::Path::new("/nonexistent/ztr.toml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_invalid_grade_bands_rejected() {
    let file = write_config(
        r#"
[[grade_bands]]
min_percentage = 40.0
grade = "A"
message = "Pass"
"#,
    );

    let config = TomlConfig::load(Some(file.path())).unwrap();
    let err = config.grade_table().unwrap_err();
    assert!(err.to_string().contains("Invalid grade_bands"));
}

#[test]
fn test_nan_grade_band_rejected() {
    let file = write_config(
        r#"
[[grade_bands]]
min_percentage = 80.0
grade = "A"
message = "Great"

[[grade_bands]]
min_percentage = nan
grade = "B"
message = "Good"

[[grade_bands]]
min_percentage = 0.0
grade = "F"
message = "Keep trying"
"#,
    );

    let config = TomlConfig::load(Some(file.path())).unwrap();
    let err = config.grade_table().unwrap_err();
    assert!(err.to_string().contains("non-finite"));
}

#[test]
fn test_empty_grade_bands_use_standard_table() {
    let table = TomlConfig::default().grade_table().unwrap();
    assert_eq!(table.bands().len(), 5);
    assert_eq!(table.evaluate(85, 100).unwrap().grade, Grade::A);
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = write_config("store_url = [unterminated");
    let err = TomlConfig::load(Some(file.path())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
