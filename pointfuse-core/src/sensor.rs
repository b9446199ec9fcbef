// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The narrow interfaces the merger consumes.
//!
//! Sensors, pose resolution and point-set composition are external
//! collaborators. The merger only relies on the three traits below, so its
//! ordering, all-or-nothing and cancellation behavior can be exercised with
//! fakes.

use crate::{CancellationToken, PointCloud, Pose};
use async_trait::async_trait;
use pointfuse_error::BoxError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Capability flags reported by a sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// The sensor can produce point-cloud samples.
    pub supports_point_cloud: bool,
}

/// A source of point-cloud samples.
///
/// Implementations should observe `ctx` and return promptly once it is
/// cancelled. The merger also races each call against the token, so an
/// implementation that ignores it is abandoned rather than awaited.
#[async_trait]
pub trait Sensor: Send + Sync {
    /// Stable name; also the name of the sensor's coordinate frame.
    fn name(&self) -> &str;

    async fn properties(&self, ctx: &CancellationToken) -> Result<Properties, BoxError>;

    /// Capture the next sample.
    async fn next_point_cloud(&self, ctx: &CancellationToken) -> Result<PointCloud, BoxError>;
}

/// Shared handle to a configured sensor.
pub type SensorRef = Arc<dyn Sensor>;

/// Looks up the current rigid transform between two named frames.
#[async_trait]
pub trait PoseResolver: Send + Sync {
    /// Resolve the pose that maps `target`-frame points into the `reference` frame.
    async fn resolve_pose(
        &self,
        ctx: &CancellationToken,
        reference: &str,
        target: &str,
    ) -> Result<Pose, BoxError>;
}

/// One sensor's contribution to a merge cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePair {
    /// Sensor the sample and the offset both belong to
    pub sensor: String,
    pub sample: PointCloud,
    /// Transform from the sensor frame into the reference frame
    pub offset: Pose,
}

/// Fuses transformed samples into one cloud.
#[async_trait]
pub trait Composer: Send + Sync {
    /// `pairs` arrive in configured sensor order, reference sensor first.
    async fn compose(
        &self,
        ctx: &CancellationToken,
        pairs: Vec<SamplePair>,
    ) -> Result<PointCloud, BoxError>;
}
