// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The merged camera: one virtual sensor backed by several real ones.

use crate::config::MergedCameraConfig;
use crate::registry::Registry;
use async_trait::async_trait;
use futures::lock::Mutex;
use pointfuse_core::{
    BoxError, CancellationToken, Composer, ConfigError, MergeError, PointCloud, PoseResolver,
    Properties, Result, Sensor, SensorRef,
};
use pointfuse_exec::{capture_pairs, debug, info, merge_pairs, warn, OffsetComposer};
use std::sync::Arc;
use std::time::Duration;

/// A still image tagged with the sensor that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImage {
    pub source: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Handle to a live video stream. A merged camera never produces one.
#[derive(Debug)]
pub struct VideoStream {
    _private: (),
}

/// Lens projection model. A merged camera never produces one.
#[derive(Debug)]
pub struct Projector {
    _private: (),
}

struct State {
    closed: bool,
    generation: u64,
    sensors: Vec<SensorRef>,
    resolver: Arc<dyn PoseResolver>,
    timeout: Option<Duration>,
}

/// Fuses the point clouds of several sensors into the frame of the first.
///
/// # Reference frame
///
/// The first configured camera is the reference sensor. Every merged cloud
/// is expressed in its frame, and its own samples are taken as-is (identity
/// offset). Reordering the configuration changes the output frame.
///
/// # Concurrency
///
/// Capture cycles, reconfiguration and close serialize on one async lock,
/// so at most one cycle runs at a time and a cycle never sees a half-applied
/// configuration. Inside a cycle every sensor is captured concurrently.
///
/// # Lifecycle
///
/// Open until [`close`](Self::close); closed is terminal and every later
/// cycle or reconfiguration fails with [`MergeError::Closed`].
///
/// # Example
///
/// ```rust
/// use pointfuse::{CancellationToken, MergedCamera, MergedCameraConfig, Registry};
/// use pointfuse_test_utils::fixtures::{cloud_at, shift};
/// use pointfuse_test_utils::{FakeResolver, FakeSensor};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> pointfuse::Result<()> {
/// let registry = Registry::new()
///     .with_sensor(Arc::new(FakeSensor::new("front").with_cloud(cloud_at(1.0, 0.0, 0.0))))
///     .with_sensor(Arc::new(FakeSensor::new("rear").with_cloud(cloud_at(1.0, 0.0, 0.0))))
///     .with_pose_resolver(Arc::new(FakeResolver::new().with_pose("rear", shift(-2.0, 0.0, 0.0))));
///
/// let ctx = CancellationToken::new();
/// let camera = MergedCamera::new(
///     &ctx,
///     "merged",
///     &MergedCameraConfig::new(["front", "rear"]),
///     &registry,
/// )
/// .await?;
///
/// let cloud = camera.next_point_cloud(&ctx).await?;
/// assert_eq!(cloud.len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct MergedCamera {
    name: String,
    composer: Arc<dyn Composer>,
    state: Mutex<State>,
}

impl MergedCamera {
    /// Build a merged camera using [`OffsetComposer`].
    ///
    /// # Errors
    /// Fails with [`MergeError::Config`] for the same reasons as
    /// [`reconfigure`](Self::reconfigure).
    pub async fn new(
        ctx: &CancellationToken,
        name: impl Into<String>,
        config: &MergedCameraConfig,
        registry: &Registry,
    ) -> Result<Self> {
        Self::with_composer(ctx, name, config, registry, Arc::new(OffsetComposer)).await
    }

    /// Build a merged camera that fuses with `composer`.
    ///
    /// # Errors
    /// Fails with [`MergeError::Config`] for the same reasons as
    /// [`reconfigure`](Self::reconfigure).
    pub async fn with_composer(
        ctx: &CancellationToken,
        name: impl Into<String>,
        config: &MergedCameraConfig,
        registry: &Registry,
        composer: Arc<dyn Composer>,
    ) -> Result<Self> {
        let name = name.into();
        let state = resolve_state(ctx, &name, config, registry).await?;
        info!(
            "merged camera {} configured with {} cameras",
            name,
            state.sensors.len()
        );

        Ok(Self {
            name,
            composer,
            state: Mutex::new(State {
                generation: 1,
                ..state
            }),
        })
    }

    /// Replace the active sensor set.
    ///
    /// The configuration is validated before any sensor is contacted. Each
    /// named sensor must exist in `registry` and report point-cloud support.
    /// The new set is swapped in only if every check passes; otherwise the
    /// previous set stays active. Waits for an in-flight cycle to finish.
    ///
    /// # Errors
    /// - [`MergeError::Closed`] after [`close`](Self::close), whatever the configuration
    /// - [`MergeError::Config`] naming the first offending field or sensor
    /// - [`MergeError::Cancelled`] if `ctx` is cancelled while querying sensors
    pub async fn reconfigure(
        &self,
        ctx: &CancellationToken,
        config: &MergedCameraConfig,
        registry: &Registry,
    ) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.closed {
            return Err(MergeError::Closed);
        }

        let next = resolve_state(ctx, &self.name, config, registry).await?;
        *state = State {
            generation: state.generation + 1,
            ..next
        };

        info!(
            "merged camera {} reconfigured (generation {}) with {} cameras",
            self.name,
            state.generation,
            state.sensors.len()
        );
        Ok(())
    }

    /// Capture from every sensor and merge into the reference frame.
    ///
    /// Exactly one cycle: every sensor is captured and every non-reference
    /// offset is resolved afresh, concurrently; the merge runs once all
    /// pairs are in. Any single failure fails the cycle. Nothing is retried.
    ///
    /// # Errors
    /// - [`MergeError::Closed`] after [`close`](Self::close); no sensor is contacted
    /// - [`MergeError::SensorCapture`] / [`MergeError::PoseResolution`] naming the failing sensor
    /// - [`MergeError::Composition`] if fusion fails
    /// - [`MergeError::Cancelled`] if `ctx` is cancelled
    /// - [`MergeError::Timeout`] if the configured timeout elapses
    pub async fn next_point_cloud(&self, ctx: &CancellationToken) -> Result<PointCloud> {
        let state = self.state.lock().await;
        if state.closed {
            return Err(MergeError::Closed);
        }

        debug!(
            "merged camera {} starting cycle (generation {})",
            self.name, state.generation
        );

        let cycle = async {
            let pairs = capture_pairs(ctx, &state.sensors, &state.resolver).await?;
            merge_pairs(ctx, self.composer.as_ref(), pairs).await
        };

        let merged = match state.timeout {
            Some(limit) => tokio::time::timeout(limit, cycle)
                .await
                .unwrap_or_else(|_| Err(MergeError::timeout("next point cloud", limit))),
            None => cycle.await,
        };

        match &merged {
            Ok(cloud) => debug!("merged camera {} produced {} points", self.name, cloud.len()),
            Err(error) => warn!("merged camera {} cycle failed: {}", self.name, error),
        }
        merged
    }

    /// Stop accepting work. Idempotent.
    ///
    /// Waits for an in-flight cycle to finish rather than cancelling it.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        if !state.closed {
            state.closed = true;
            info!("merged camera {} closed", self.name);
        }
    }

    /// Reports point-cloud support and nothing else.
    pub fn properties(&self) -> Properties {
        Properties {
            supports_point_cloud: true,
        }
    }

    /// # Errors
    /// Always fails with [`MergeError::Unsupported`].
    pub async fn images(&self, _ctx: &CancellationToken) -> Result<Vec<NamedImage>> {
        Err(MergeError::unsupported("Images"))
    }

    /// # Errors
    /// Always fails with [`MergeError::Unsupported`].
    pub async fn stream(&self, _ctx: &CancellationToken) -> Result<VideoStream> {
        Err(MergeError::unsupported("Stream"))
    }

    /// # Errors
    /// Always fails with [`MergeError::Unsupported`].
    pub async fn projector(&self, _ctx: &CancellationToken) -> Result<Projector> {
        Err(MergeError::unsupported("Projector"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }

    /// Names of the active sensors, reference first.
    pub async fn sensor_names(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state.sensors.iter().map(|s| s.name().to_owned()).collect()
    }

    /// Frame the merged output is expressed in.
    pub async fn reference_frame(&self) -> String {
        let state = self.state.lock().await;
        state
            .sensors
            .first()
            .map(|s| s.name().to_owned())
            .unwrap_or_default()
    }

    /// Incremented on every successful reconfiguration; starts at 1.
    pub async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }
}

async fn resolve_state(
    ctx: &CancellationToken,
    name: &str,
    config: &MergedCameraConfig,
    registry: &Registry,
) -> Result<State> {
    config.validate(name)?;
    let resolver = registry.pose_resolver()?;

    let mut sensors = Vec::with_capacity(config.cameras().len());
    for camera in config.cameras() {
        let sensor = registry.sensor(camera)?;

        let properties = ctx
            .run_until_cancelled(sensor.properties(ctx))
            .await
            .ok_or_else(|| MergeError::cancelled("configuration"))?
            .map_err(|source| ConfigError::PropertiesUnavailable {
                name: camera.clone(),
                source,
            })?;

        if !properties.supports_point_cloud {
            return Err(ConfigError::PointCloudUnsupported {
                name: camera.clone(),
            }
            .into());
        }

        sensors.push(sensor);
    }

    Ok(State {
        closed: false,
        generation: 0,
        sensors,
        resolver,
        timeout: config.timeout(),
    })
}

#[async_trait]
impl Sensor for MergedCamera {
    fn name(&self) -> &str {
        &self.name
    }

    async fn properties(
        &self,
        _ctx: &CancellationToken,
    ) -> std::result::Result<Properties, BoxError> {
        Ok(MergedCamera::properties(self))
    }

    async fn next_point_cloud(
        &self,
        ctx: &CancellationToken,
    ) -> std::result::Result<PointCloud, BoxError> {
        MergedCamera::next_point_cloud(self, ctx)
            .await
            .map_err(Into::into)
    }
}
