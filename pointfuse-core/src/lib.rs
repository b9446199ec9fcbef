// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod cancellation_token;
pub mod point_cloud;
pub mod pose;
pub mod sensor;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::point_cloud::{Point, PointCloud};
pub use self::pose::Pose;
pub use self::sensor::{Composer, PoseResolver, Properties, SamplePair, Sensor, SensorRef};
pub use pointfuse_error::{BoxError, ConfigError, MergeError, Result, ResultExt};
