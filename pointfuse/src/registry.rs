// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Dependencies a merged camera is wired against.

use pointfuse_core::{ConfigError, PoseResolver, SensorRef};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Well-known dependency name of the pose resolver.
pub const POSE_RESOLVER: &str = "builtin:frame_system";

/// Named sensors plus the pose resolver, as supplied by the host runtime.
///
/// Sensors are keyed by [`Sensor::name`](pointfuse_core::Sensor::name).
#[derive(Clone, Default)]
pub struct Registry {
    sensors: HashMap<String, SensorRef>,
    pose_resolver: Option<Arc<dyn PoseResolver>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sensor(mut self, sensor: SensorRef) -> Self {
        self.insert_sensor(sensor);
        self
    }

    #[must_use]
    pub fn with_pose_resolver(mut self, resolver: Arc<dyn PoseResolver>) -> Self {
        self.pose_resolver = Some(resolver);
        self
    }

    /// Register a sensor, returning the one it replaces.
    pub fn insert_sensor(&mut self, sensor: SensorRef) -> Option<SensorRef> {
        self.sensors.insert(sensor.name().to_owned(), sensor)
    }

    /// # Errors
    /// Returns [`ConfigError::UnknownSensor`] if no sensor is registered under `name`.
    pub fn sensor(&self, name: &str) -> Result<SensorRef, ConfigError> {
        self.sensors
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownSensor {
                name: name.to_owned(),
            })
    }

    /// # Errors
    /// Returns [`ConfigError::MissingPoseResolver`] if none was registered.
    pub fn pose_resolver(&self) -> Result<Arc<dyn PoseResolver>, ConfigError> {
        self.pose_resolver
            .clone()
            .ok_or_else(|| ConfigError::MissingPoseResolver {
                name: POSE_RESOLVER.to_owned(),
            })
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.sensors.keys().collect();
        names.sort();
        f.debug_struct("Registry")
            .field("sensors", &names)
            .field("pose_resolver", &self.pose_resolver.is_some())
            .finish()
    }
}
