// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Rigid 3-D transforms between sensor frames.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A rigid body transform (rotation followed by translation).
///
/// A pose resolved for sensor `S` against reference frame `R` maps points
/// expressed in `S` coordinates into `R` coordinates.
///
/// # Example
///
/// ```
/// use pointfuse_core::Pose;
/// use glam::Vec3;
///
/// let offset = Pose::from_translation(Vec3::new(0.5, 0.0, 0.0));
/// let p = offset.transform_point(Vec3::ZERO);
/// assert!((p.x - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Orientation of the source frame in the target frame (unit quaternion)
    pub rotation: Quat,
    /// Origin of the source frame in the target frame
    pub translation: Vec3,
}

impl Pose {
    /// The zero pose: points map onto themselves.
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    /// Build a pose; the rotation is normalized.
    #[must_use]
    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation: rotation.normalize(),
            translation,
        }
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation,
        }
    }

    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self::new(rotation, Vec3::ZERO)
    }

    /// Map a point from the source frame into the target frame.
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.translation
    }

    /// `self ∘ other`: apply `other` first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: (self.rotation * other.rotation).normalize(),
            translation: self.rotation * other.translation + self.translation,
        }
    }

    /// The transform mapping target-frame points back into the source frame.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            rotation,
            translation: -(rotation * self.translation),
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::IDENTITY, f32::EPSILON)
    }

    /// Component-wise comparison; `q` and `-q` describe the same rotation.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        let same_rotation = self.rotation.abs_diff_eq(other.rotation, epsilon)
            || self.rotation.abs_diff_eq(-other.rotation, epsilon);
        same_rotation && self.translation.abs_diff_eq(other.translation, epsilon)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
