// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the pointfuse multi-sensor merger
//!
//! Every failure a merge cycle can produce is one variant of [`MergeError`].
//! Variants carry the sensor name, frame names or stage name needed to
//! diagnose the failure without re-running with extra instrumentation.
//!
//! # Examples
//!
//! ```
//! use pointfuse_error::{ConfigError, MergeError, Result};
//!
//! fn configure(cameras: &[&str]) -> Result<()> {
//!     if cameras.is_empty() {
//!         return Err(ConfigError::EmptySensorList.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(matches!(configure(&[]), Err(MergeError::Config(_))));
//! ```

use std::time::Duration;

/// Boxed error returned by external collaborators (sensors, resolvers, composers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration-time failures
///
/// These are raised by `configure`/`reconfigure` before the active sensor set
/// is swapped, so the orchestrator keeps its previous valid state.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required attribute is absent from the configuration
    #[error("{path}: missing required field \"{field}\"")]
    MissingField {
        /// Location of the configuration block
        path: String,
        /// Name of the missing attribute
        field: String,
    },

    /// The cycle timeout is present but zero
    #[error("{path}: timeout_ms must be greater than zero")]
    ZeroTimeout {
        /// Location of the configuration block
        path: String,
    },

    /// The sensor list is present but empty
    #[error("at least one camera must be configured")]
    EmptySensorList,

    /// The same sensor name appears more than once
    #[error("camera {name} is listed more than once")]
    DuplicateSensor {
        /// The repeated name
        name: String,
    },

    /// A configured name does not resolve to any known sensor
    #[error("error getting camera {name}: not found")]
    UnknownSensor {
        /// The unresolved name
        name: String,
    },

    /// Querying a sensor's properties failed
    #[error("error getting camera properties {name}")]
    PropertiesUnavailable {
        /// Sensor whose properties could not be read
        name: String,
        /// Underlying failure
        #[source]
        source: BoxError,
    },

    /// A sensor cannot produce point clouds
    #[error("camera {name} does not support point clouds")]
    PointCloudUnsupported {
        /// The offending sensor
        name: String,
    },

    /// No pose resolver was supplied alongside the sensors
    #[error("pose resolver \"{name}\" is missing from the dependencies")]
    MissingPoseResolver {
        /// Well-known name the resolver is looked up under
        name: String,
    },

    /// The raw configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Parse(#[source] BoxError),
}

/// Root error type for all pointfuse operations
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Configuration was rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The orchestrator has been closed and accepts no further work
    #[error("session closed")]
    Closed,

    /// A sensor failed to produce its sample for this cycle
    #[error("camera {sensor} failed to capture a point cloud")]
    SensorCapture {
        /// Name of the failing sensor
        sensor: String,
        /// Underlying failure
        #[source]
        source: BoxError,
    },

    /// The transform between two frames could not be resolved
    #[error("issue getting transform from camera {target} to reference camera {reference}")]
    PoseResolution {
        /// The reference frame every sample is expressed in
        reference: String,
        /// The sensor frame whose offset was requested
        target: String,
        /// Underlying failure
        #[source]
        source: BoxError,
    },

    /// Every pair was gathered but composing them failed
    #[error("issue merging point clouds from {inputs} cameras")]
    Composition {
        /// Number of sample pairs handed to the composer
        inputs: usize,
        /// Underlying failure
        #[source]
        source: BoxError,
    },

    /// The caller cancelled the cycle
    #[error("cancelled during {stage}")]
    Cancelled {
        /// Stage that observed the cancellation
        stage: String,
    },

    /// The cycle exceeded its configured time limit
    #[error("operation timed out after {duration:?}: {operation}")]
    Timeout {
        /// The operation that timed out
        operation: String,
        /// How long we waited
        duration: Duration,
    },

    /// A per-sensor task panicked or was aborted
    #[error("capture task for camera {sensor} failed: {context}")]
    TaskFailed {
        /// Sensor the task was working for
        sensor: String,
        /// Panic or abort description
        context: String,
    },

    /// The requested capability is not offered by the merged camera
    #[error("{capability} is unimplemented")]
    Unsupported {
        /// Name of the capability
        capability: String,
    },
}

impl MergeError {
    /// Create a capture error for the given sensor
    pub fn capture(sensor: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::SensorCapture {
            sensor: sensor.into(),
            source: source.into(),
        }
    }

    /// Create a pose resolution error between two frames
    pub fn pose(
        reference: impl Into<String>,
        target: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::PoseResolution {
            reference: reference.into(),
            target: target.into(),
            source: source.into(),
        }
    }

    /// Create a composition error
    pub fn composition(inputs: usize, source: impl Into<BoxError>) -> Self {
        Self::Composition {
            inputs,
            source: source.into(),
        }
    }

    /// Create a cancellation error for the given stage
    pub fn cancelled(stage: impl Into<String>) -> Self {
        Self::Cancelled {
            stage: stage.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a task failure error
    pub fn task_failed(sensor: impl Into<String>, context: impl Into<String>) -> Self {
        Self::TaskFailed {
            sensor: sensor.into(),
            context: context.into(),
        }
    }

    /// Create an unsupported capability error
    pub fn unsupported(capability: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: capability.into(),
        }
    }

    /// Name of the sensor this error is scoped to, if any
    #[must_use]
    pub fn sensor(&self) -> Option<&str> {
        match self {
            Self::SensorCapture { sensor, .. } | Self::TaskFailed { sensor, .. } => Some(sensor),
            Self::PoseResolution { target, .. } => Some(target),
            Self::Config(
                ConfigError::UnknownSensor { name }
                | ConfigError::PropertiesUnavailable { name, .. }
                | ConfigError::PointCloudUnsupported { name }
                | ConfigError::DuplicateSensor { name },
            ) => Some(name),
            _ => None,
        }
    }

    /// Check if retrying the whole cycle could succeed
    ///
    /// Sensor, resolver and composer failures can be transient. Nothing is
    /// retried internally; this only informs the caller.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SensorCapture { .. }
                | Self::PoseResolution { .. }
                | Self::Composition { .. }
                | Self::Timeout { .. }
                | Self::TaskFailed { .. }
        )
    }

    /// Check if this error will persist no matter how often the call is repeated
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::Closed | Self::Config(_) | Self::Unsupported { .. }
        )
    }
}

/// Specialized Result type for pointfuse operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Helper trait for attributing collaborator failures to a merge stage
///
/// Collaborators return plain boxed errors; these adapters attach the sensor
/// or frame names the taxonomy requires.
pub trait ResultExt<T> {
    /// Attribute a failure to capturing from `sensor`
    ///
    /// # Errors
    /// Returns `Err(MergeError::SensorCapture)` if the underlying result is `Err`.
    fn capture_context(self, sensor: &str) -> Result<T>;

    /// Attribute a failure to resolving the pose of `target` in `reference`
    ///
    /// # Errors
    /// Returns `Err(MergeError::PoseResolution)` if the underlying result is `Err`.
    fn pose_context(self, reference: &str, target: &str) -> Result<T>;

    /// Attribute a failure to composing `inputs` sample pairs
    ///
    /// # Errors
    /// Returns `Err(MergeError::Composition)` if the underlying result is `Err`.
    fn compose_context(self, inputs: usize) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<BoxError>,
{
    fn capture_context(self, sensor: &str) -> Result<T> {
        self.map_err(|e| MergeError::capture(sensor, e))
    }

    fn pose_context(self, reference: &str, target: &str) -> Result<T> {
        self.map_err(|e| MergeError::pose(reference, target, e))
    }

    fn compose_context(self, inputs: usize) -> Result<T> {
        self.map_err(|e| MergeError::composition(inputs, e))
    }
}
