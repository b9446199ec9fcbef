// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pointfuse_core::{CancellationToken, PoseResolver, Sensor};
use pointfuse_test_utils::fixtures::{cloud_at, shift, xs};
use pointfuse_test_utils::{FakeResolver, FakeSensor};
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_fake_sensor_counts_calls() {
    let ctx = CancellationToken::new();
    let sensor = FakeSensor::new("a").with_cloud(cloud_at(3.0, 0.0, 0.0));

    let props = sensor.properties(&ctx).await.unwrap();
    let cloud = sensor.next_point_cloud(&ctx).await.unwrap();

    assert!(props.supports_point_cloud);
    assert_eq!(xs(&cloud), vec![3.0]);
    assert_eq!(sensor.properties_calls(), 1);
    assert_eq!(sensor.capture_calls(), 1);
}

#[tokio::test]
async fn test_hanging_sensor_releases_on_cancel() {
    let ctx = CancellationToken::new();
    let sensor = FakeSensor::new("slow").hanging();
    let canceller = ctx.clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        canceller.cancel();
    });

    let result = timeout(Duration::from_secs(1), sensor.next_point_cloud(&ctx))
        .await
        .expect("hanging sensor ignored cancellation");

    assert!(result.is_err());
    assert_eq!(sensor.cancellations(), 1);
}

#[tokio::test]
async fn test_fake_resolver_logs_and_fails_unknown_frames() {
    let ctx = CancellationToken::new();
    let resolver = FakeResolver::new().with_pose("b", shift(1.0, 0.0, 0.0));

    let pose = resolver.resolve_pose(&ctx, "a", "b").await.unwrap();
    let missing = resolver.resolve_pose(&ctx, "a", "zz").await;

    assert_eq!(pose, shift(1.0, 0.0, 0.0));
    assert!(missing.is_err());
    assert_eq!(
        resolver.calls(),
        vec![
            ("a".to_string(), "b".to_string()),
            ("a".to_string(), "zz".to_string())
        ]
    );
}
