// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Merged camera configuration.

use crate::registry::POSE_RESOLVER;
use pointfuse_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Attributes of a merged camera.
///
/// `cameras` is ordered: the first entry is the reference sensor, and the
/// merged cloud is expressed in its frame.
///
/// # Example
///
/// ```
/// use pointfuse::MergedCameraConfig;
///
/// let config = MergedCameraConfig::from_json(r#"{"cameras": ["front", "rear"]}"#).unwrap();
/// let deps = config.validate("components.merged").unwrap();
/// assert_eq!(deps[..2], ["front", "rear"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedCameraConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cameras: Option<Vec<String>>,

    /// Upper bound for one capture-and-merge cycle, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl MergedCameraConfig {
    pub fn new<I, S>(cameras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cameras: Some(cameras.into_iter().map(Into::into).collect()),
            timeout_ms: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// # Errors
    /// Returns [`ConfigError::Parse`] if `json` is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(Box::new(e)))
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Configured sensor names, in order.
    #[must_use]
    pub fn cameras(&self) -> &[String] {
        self.cameras.as_deref().unwrap_or_default()
    }

    /// Check the attributes and list the dependencies they require.
    ///
    /// Runs without contacting any sensor. The dependency list is the
    /// configured cameras, in order, followed by the pose resolver.
    ///
    /// # Errors
    /// - [`ConfigError::MissingField`] if `cameras` is absent
    /// - [`ConfigError::EmptySensorList`] if it is empty
    /// - [`ConfigError::ZeroTimeout`] if `timeout_ms` is zero
    /// - [`ConfigError::DuplicateSensor`] if a name repeats
    pub fn validate(&self, path: &str) -> Result<Vec<String>, ConfigError> {
        let cameras = self
            .cameras
            .as_ref()
            .ok_or_else(|| ConfigError::MissingField {
                path: path.to_owned(),
                field: "cameras".to_owned(),
            })?;

        if cameras.is_empty() {
            return Err(ConfigError::EmptySensorList);
        }

        if self.timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout {
                path: path.to_owned(),
            });
        }

        let mut seen = HashSet::with_capacity(cameras.len());
        if let Some(name) = cameras.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(ConfigError::DuplicateSensor { name: name.clone() });
        }

        let mut deps = cameras.clone();
        deps.push(POSE_RESOLVER.to_owned());
        Ok(deps)
    }
}
