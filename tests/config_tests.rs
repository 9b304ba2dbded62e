mod support;

use ledgerbot::error::{ConfigError, Error};
use ledgerbot::infrastructure::config::settings::Config;
use rust_decimal_macros::dec;

use support::config::write_temp_config;

#[test]
fn config_loads_from_file() {
    let file = write_temp_config(&ledgerbot::testkit::config::toml(4242));

    let config = Config::load(file.path()).expect("load config");
    assert_eq!(config.ledger.operator_id, 4242);
    assert_eq!(config.ledger.monthly_limit, dec!(10000));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn config_missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = Config::load(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn config_requires_operator() {
    let file = write_temp_config("[ledger]\nmonthly_limit = 100\n");

    let result = Config::load(file.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField {
            field: "ledger.operator_id"
        }))
    ));
}

#[test]
fn config_rejects_negative_limit() {
    let file = write_temp_config("[ledger]\noperator_id = 1\nmonthly_limit = -5\n");

    let result = Config::load(file.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "ledger.monthly_limit",
            ..
        }))
    ));
}

#[test]
fn config_rejects_unknown_log_format() {
    let file = write_temp_config("[logging]\nformat = \"yaml\"\n[ledger]\noperator_id = 1\n");

    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("logging.format"), "{err}");
}

#[test]
fn config_rejects_wrong_types() {
    let file = write_temp_config("[ledger]\noperator_id = \"admin\"\n");

    let result = Config::load(file.path());
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}
