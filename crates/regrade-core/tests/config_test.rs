//! Tests for the Regrade configuration system.

use std::sync::Mutex;

use regrade_core::config::{CliOverrides, RegradeConfig};
use regrade_core::constants::{DEFAULT_FORBIDDEN_TERMS, DEFAULT_NEGATION_TERMS};
use regrade_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all REGRADE_ env vars to prevent cross-test contamination.
fn clear_regrade_env_vars() {
    for key in [
        "REGRADE_FORBIDDEN_TERMS",
        "REGRADE_NEGATION_TERMS",
        "REGRADE_LOWEST_GRADE",
        "REGRADE_LATEST_YEAR",
        "REGRADE_BATCH_SIZE",
        "REGRADE_THREADS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_regrade_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("regrade.toml"),
        r#"
[grading]
lowest_grade = "D"
latest_year = 2024

[recompute]
batch_size = 100
"#,
    )
    .unwrap();

    std::env::set_var("REGRADE_BATCH_SIZE", "25");

    let cli = CliOverrides {
        lowest_grade: Some("F".into()),
        ..Default::default()
    };

    let config = RegradeConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI beats project
    assert_eq!(config.grading.effective_lowest_grade(), "F");
    // Env beats project
    assert_eq!(config.recompute.effective_batch_size(), 25);
    // Project beats defaults
    assert_eq!(config.grading.effective_latest_year(), 2024);

    clear_regrade_env_vars();
}

#[test]
fn test_load_missing_files_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_regrade_env_vars();

    let dir = tempdir();
    let config = RegradeConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.grading.effective_lowest_grade(), "C");
    assert_eq!(config.grading.effective_latest_year(), 2025);
    assert_eq!(config.recompute.effective_batch_size(), 200);
    assert_eq!(
        config.grading.effective_forbidden_terms().len(),
        DEFAULT_FORBIDDEN_TERMS.len()
    );
    assert_eq!(
        config.grading.effective_negation_terms().len(),
        DEFAULT_NEGATION_TERMS.len()
    );
}

#[test]
fn test_env_term_lists_are_comma_separated() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_regrade_env_vars();

    let dir = tempdir();
    std::env::set_var("REGRADE_FORBIDDEN_TERMS", "rat, flies ,sewage");
    std::env::set_var("REGRADE_NEGATION_TERMS", "no");

    let config = RegradeConfig::load(dir.path(), None).unwrap();
    assert_eq!(
        config.grading.effective_forbidden_terms(),
        vec!["rat", "flies", "sewage"]
    );
    assert_eq!(config.grading.effective_negation_terms(), vec!["no"]);

    clear_regrade_env_vars();
}

#[test]
fn test_invalid_env_number_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_regrade_env_vars();

    let dir = tempdir();
    std::env::set_var("REGRADE_LATEST_YEAR", "next year");

    let result = RegradeConfig::load(dir.path(), None);
    match result {
        Err(ConfigError::InvalidEnvValue { key, value, .. }) => {
            assert_eq!(key, "REGRADE_LATEST_YEAR");
            assert_eq!(value, "next year");
        }
        other => panic!("Expected InvalidEnvValue, got: {:?}", other),
    }

    clear_regrade_env_vars();
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_regrade_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("regrade.toml"), "this is not valid toml {{{{").unwrap();

    match RegradeConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn test_empty_forbidden_terms_fail_validation() {
    let result = RegradeConfig::from_toml(
        r#"
[grading]
forbidden_terms = []
"#,
    );
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "grading.forbidden_terms")
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_empty_negation_terms_are_allowed() {
    let config = RegradeConfig::from_toml(
        r#"
[grading]
negation_terms = []
"#,
    )
    .unwrap();
    assert!(config.grading.effective_negation_terms().is_empty());
}

#[test]
fn test_zero_batch_size_fails_validation() {
    let result = RegradeConfig::from_toml(
        r#"
[recompute]
batch_size = 0
"#,
    );
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "recompute.batch_size")
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_blank_lowest_grade_fails_validation() {
    let result = RegradeConfig::from_toml(
        r#"
[grading]
lowest_grade = "  "
"#,
    );
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = RegradeConfig::from_toml(
        r#"
[grading]
lowest_grade = "D"
colour = "blue"

[storage]
path = "/tmp/regrade.db"
"#,
    )
    .unwrap();
    assert_eq!(config.grading.lowest_grade.as_deref(), Some("D"));
}

#[test]
fn test_toml_round_trip() {
    let mut config = RegradeConfig::default();
    config.grading.forbidden_terms = Some(vec!["rat".into(), "roach".into()]);
    config.grading.lowest_grade = Some("D".into());
    config.recompute.batch_size = Some(64);

    let serialized = config.to_toml().unwrap();
    let parsed = RegradeConfig::from_toml(&serialized).unwrap();
    assert_eq!(parsed, config);
}
