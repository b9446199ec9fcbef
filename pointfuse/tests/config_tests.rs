// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pointfuse::{ConfigError, MergedCameraConfig, POSE_RESOLVER};
use std::time::Duration;

#[test]
fn test_validate_lists_cameras_then_pose_resolver() {
    // Arrange
    let config = MergedCameraConfig::new(["front", "left", "right"]);

    // Act
    let deps = config.validate("components.merged").unwrap();

    // Assert
    assert_eq!(deps, vec!["front", "left", "right", POSE_RESOLVER]);
}

#[test]
fn test_missing_cameras_names_path_and_field() {
    // Arrange
    let config = MergedCameraConfig::from_json(r#"{"timeout_ms": 50}"#).unwrap();

    // Act
    let err = config.validate("components.merged").unwrap_err();

    // Assert
    assert!(matches!(
        &err,
        ConfigError::MissingField { path, field } if path == "components.merged" && field == "cameras"
    ));
    assert_eq!(
        err.to_string(),
        "components.merged: missing required field \"cameras\""
    );
}

#[test]
fn test_empty_and_duplicate_lists_are_rejected() {
    // Arrange
    let empty = MergedCameraConfig::from_json(r#"{"cameras": []}"#).unwrap();
    let duplicate = MergedCameraConfig::new(["a", "b", "a"]);

    // Act & Assert
    assert!(matches!(
        empty.validate("m"),
        Err(ConfigError::EmptySensorList)
    ));
    assert!(matches!(
        duplicate.validate("m"),
        Err(ConfigError::DuplicateSensor { name }) if name == "a"
    ));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    // Arrange
    let result = MergedCameraConfig::from_json(r#"{"cameras": "front"}"#);

    // Act & Assert
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_timeout_round_trips_through_json() -> anyhow::Result<()> {
    // Arrange
    let config = MergedCameraConfig::new(["front"]).with_timeout(Duration::from_millis(250));

    // Act
    let json = serde_json::to_string(&config)?;
    let parsed = MergedCameraConfig::from_json(&json)?;

    // Assert
    assert_eq!(json, r#"{"cameras":["front"],"timeout_ms":250}"#);
    assert_eq!(parsed.timeout(), Some(Duration::from_millis(250)));
    assert_eq!(parsed.cameras(), ["front"]);
    Ok(())
}

#[test]
fn test_absent_timeout_means_unbounded() {
    // Arrange
    let config = MergedCameraConfig::new(["front"]);

    // Act & Assert
    assert_eq!(config.timeout(), None);
    assert_eq!(serde_json::to_string(&config).unwrap(), r#"{"cameras":["front"]}"#);
}

#[test]
fn test_zero_timeout_is_rejected() {
    // Arrange
    let config = MergedCameraConfig::from_json(r#"{"cameras": ["front"], "timeout_ms": 0}"#).unwrap();

    // Act
    let err = config.validate("components.merged").unwrap_err();

    // Assert
    assert!(matches!(&err, ConfigError::ZeroTimeout { path } if path == "components.merged"));
    assert_eq!(
        err.to_string(),
        "components.merged: timeout_ms must be greater than zero"
    );
}
