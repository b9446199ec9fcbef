// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! In-memory point cloud payloads.

use crate::Pose;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One 3-D sample, optionally colored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub position: Vec3,
    pub color: Option<[u8; 3]>,
}

impl Point {
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            color: None,
        }
    }

    #[must_use]
    pub const fn with_color(position: Vec3, color: [u8; 3]) -> Self {
        Self {
            position,
            color: Some(color),
        }
    }
}

/// An unordered set of points expressed in a single frame.
///
/// Sensors return one per capture; the merged result is also a
/// `PointCloud`, expressed in the reference sensor's frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Append every point of `other`, keeping their order.
    pub fn append(&mut self, other: &mut Self) {
        self.points.append(&mut other.points);
    }

    /// Re-express every point through `pose`; colors are kept.
    #[must_use]
    pub fn transformed(&self, pose: &Pose) -> Self {
        self.iter()
            .map(|p| Point {
                position: pose.transform_point(p.position),
                color: p.color,
            })
            .collect()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty cloud.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.points.first()?.position;
        Some(self.iter().fold((first, first), |(lo, hi), p| {
            (lo.min(p.position), hi.max(p.position))
        }))
    }
}

impl FromIterator<Point> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PointCloud {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point;
    type IntoIter = core::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl Extend<Point> for PointCloud {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}
