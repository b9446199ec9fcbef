// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ready-made clouds and poses.

use glam::Vec3;
use pointfuse_core::{Point, PointCloud, Pose, SensorRef};
use std::sync::Arc;

use crate::FakeSensor;

/// A single-point cloud at `(x, y, z)`.
pub fn cloud_at(x: f32, y: f32, z: f32) -> PointCloud {
    PointCloud::from_points(vec![Point::new(Vec3::new(x, y, z))])
}

/// `count` points along the X axis, one unit apart, starting at the origin.
pub fn line_cloud(count: usize) -> PointCloud {
    (0..count)
        .map(|i| Point::new(Vec3::new(i as f32, 0.0, 0.0)))
        .collect()
}

pub fn shift(x: f32, y: f32, z: f32) -> Pose {
    Pose::from_translation(Vec3::new(x, y, z))
}

/// Upcast shared fakes into the handle type the merger consumes.
pub fn sensor_refs(sensors: &[Arc<FakeSensor>]) -> Vec<SensorRef> {
    sensors
        .iter()
        .map(|sensor| sensor.clone() as SensorRef)
        .collect()
}

/// X coordinates of every point, in order.
pub fn xs(cloud: &PointCloud) -> Vec<f32> {
    cloud.iter().map(|p| p.position.x).collect()
}
