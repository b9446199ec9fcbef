// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # pointfuse
//!
//! Merges the point clouds of several spatially distributed sensors into one
//! cloud expressed in the frame of a reference sensor.
//!
//! ## Overview
//!
//! A [`MergedCamera`] owns an ordered list of sensors. Each call to
//! [`MergedCamera::next_point_cloud`] runs one capture cycle:
//!
//! 1. every sensor is asked for a sample, concurrently
//! 2. the offset from each sensor's frame to the reference frame (the first
//!    configured sensor) is resolved afresh, concurrently with the capture
//! 3. once every pair is in, the samples are composed under their offsets
//!
//! A cycle either fully succeeds or fully fails; there is no partial merge
//! and nothing is retried internally.
//!
//! ## Collaborators
//!
//! Sensors, pose resolution and composition are traits
//! ([`Sensor`], [`PoseResolver`], [`Composer`]). The host runtime supplies
//! sensors and the resolver through a [`Registry`]; [`OffsetComposer`] is
//! the default composer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pointfuse::{CancellationToken, MergedCamera, MergedCameraConfig, Registry};
//!
//! # async fn run(registry: Registry) -> pointfuse::Result<()> {
//! let ctx = CancellationToken::new();
//! let config = MergedCameraConfig::from_json(r#"{"cameras": ["front", "left", "right"]}"#)?;
//! let camera = MergedCamera::new(&ctx, "merged", &config, &registry).await?;
//!
//! let cloud = camera.next_point_cloud(&ctx).await?;
//! println!("{} points in frame {}", cloud.len(), camera.reference_frame().await);
//!
//! camera.close().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod merged_camera;
pub mod registry;

pub use config::MergedCameraConfig;
pub use merged_camera::{MergedCamera, NamedImage, Projector, VideoStream};
pub use registry::{Registry, POSE_RESOLVER};

// Re-export core types
pub use pointfuse_core::{
    BoxError, CancellationToken, Composer, ConfigError, MergeError, Point, PointCloud, Pose,
    PoseResolver, Properties, Result, SamplePair, Sensor, SensorRef,
};
pub use pointfuse_exec::OffsetComposer;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CancellationToken, MergeError, MergedCamera, MergedCameraConfig, PointCloud, Pose,
        Registry, Sensor,
    };
}
