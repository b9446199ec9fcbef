// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pointfuse_error::{BoxError, ConfigError, MergeError, Result, ResultExt};
use std::error::Error as _;
use std::io;
use std::time::Duration;

#[test]
fn test_error_display() {
    let err = MergeError::capture("left", io::Error::other("usb reset"));
    assert_eq!(err.to_string(), "camera left failed to capture a point cloud");

    let err = MergeError::pose("left", "right", io::Error::other("no frame"));
    assert_eq!(
        err.to_string(),
        "issue getting transform from camera right to reference camera left"
    );

    assert_eq!(MergeError::Closed.to_string(), "session closed");
    assert_eq!(
        MergeError::unsupported("Images").to_string(),
        "Images is unimplemented"
    );
}

#[test]
fn test_config_error_is_transparent() {
    let err: MergeError = ConfigError::PointCloudUnsupported {
        name: "thermal".to_string(),
    }
    .into();

    assert!(matches!(err, MergeError::Config(_)));
    assert_eq!(err.to_string(), "camera thermal does not support point clouds");
}

#[test]
fn test_source_is_preserved() {
    let err = MergeError::composition(3, io::Error::other("degenerate cloud"));
    let source = err.source().expect("composition error keeps its source");
    assert_eq!(source.to_string(), "degenerate cloud");
}

#[test]
fn test_sensor_scope() {
    assert_eq!(
        MergeError::capture("a", io::Error::other("x")).sensor(),
        Some("a")
    );
    assert_eq!(
        MergeError::pose("a", "c", io::Error::other("x")).sensor(),
        Some("c")
    );
    assert_eq!(
        MergeError::from(ConfigError::UnknownSensor {
            name: "ghost".to_string()
        })
        .sensor(),
        Some("ghost")
    );
    assert_eq!(MergeError::Closed.sensor(), None);
    assert_eq!(MergeError::composition(2, "bad").sensor(), None);
}

#[test]
fn test_is_recoverable() {
    assert!(MergeError::capture("a", "x").is_recoverable());
    assert!(MergeError::pose("a", "b", "x").is_recoverable());
    assert!(MergeError::composition(2, "x").is_recoverable());
    assert!(MergeError::timeout("cycle", Duration::from_millis(10)).is_recoverable());
    assert!(!MergeError::Closed.is_recoverable());
    assert!(!MergeError::cancelled("capture").is_recoverable());
}

#[test]
fn test_is_permanent() {
    assert!(MergeError::Closed.is_permanent());
    assert!(MergeError::unsupported("Stream").is_permanent());
    assert!(MergeError::from(ConfigError::EmptySensorList).is_permanent());
    assert!(!MergeError::capture("a", "x").is_permanent());
    assert!(!MergeError::cancelled("capture").is_permanent());
}

#[test]
fn test_capture_context() {
    let result: std::result::Result<(), BoxError> = Err("lens cap on".into());

    let err = result.capture_context("front").unwrap_err();
    assert!(matches!(&err, MergeError::SensorCapture { sensor, .. } if sensor == "front"));
}

#[test]
fn test_pose_context_names_both_frames() {
    let result: std::result::Result<(), io::Error> = Err(io::Error::other("stale tf"));

    let err = result.pose_context("front", "rear").unwrap_err();
    match err {
        MergeError::PoseResolution {
            reference, target, ..
        } => {
            assert_eq!(reference, "front");
            assert_eq!(target, "rear");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_compose_context_ok_passes_through() {
    let result: std::result::Result<i32, BoxError> = Ok(42);
    let value: Result<i32> = result.compose_context(4);
    assert_eq!(value.unwrap(), 42);
}
