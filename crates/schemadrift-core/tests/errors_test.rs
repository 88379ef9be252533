//! Error code and display tests.

use std::path::PathBuf;

use schemadrift_core::config::SchemaDriftConfig;
use schemadrift_core::errors::error_code;
use schemadrift_core::errors::{AnalysisError, ConfigError, ContractError, ErrorCode, ScanError};

#[test]
fn test_contract_parse_error_code() {
    let err = ContractError::Parse {
        path: PathBuf::from("contracts/contracts.yaml"),
        message: "did not find expected key".into(),
    };
    assert_eq!(err.error_code(), error_code::CONTRACT_PARSE_ERROR);
    assert!(err.coded_string().starts_with("[CONTRACT_PARSE_ERROR]"));
    assert!(err.to_string().contains("contracts/contracts.yaml"));
}

#[test]
fn test_scan_error_promotes_permission_denied() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
    let err = ScanError::from_io(PathBuf::from("src/secret.ts"), io);
    assert!(matches!(err, ScanError::PermissionDenied { .. }));
    assert_eq!(err.error_code(), error_code::PERMISSION_DENIED);
    assert_eq!(err.path(), &PathBuf::from("src/secret.ts"));

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err = ScanError::from_io(PathBuf::from("src/gone.ts"), io);
    assert_eq!(err.error_code(), error_code::FILE_READ_ERROR);
}

#[test]
fn test_analysis_error_delegates_codes() {
    let err: AnalysisError = ConfigError::Invalid {
        field: "scan.max_file_size".into(),
        message: "must be greater than 0".into(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::CONFIG_INVALID);

    let err: AnalysisError = ContractError::UnsupportedFormat {
        path: PathBuf::from("contracts.toml"),
    }
    .into();
    assert_eq!(err.error_code(), error_code::UNSUPPORTED_FORMAT);
}

#[test]
fn test_config_error_codes_by_kind() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = ConfigError::Unreadable {
        path: PathBuf::from("schemadrift.toml"),
        source: io,
    };
    assert_eq!(err.error_code(), error_code::CONFIG_READ_ERROR);
    assert!(err.coded_string().starts_with("[CONFIG_READ_ERROR] cannot read config"));

    let err = SchemaDriftConfig::from_toml("[scan\n").unwrap_err();
    assert_eq!(err.error_code(), error_code::CONFIG_PARSE_ERROR);
}
