// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use parking_lot::Mutex;
use pointfuse_core::{BoxError, CancellationToken, Pose, PoseResolver};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::time::sleep;

/// A frame table that answers pose lookups from memory.
///
/// Unknown targets fail, as do targets registered with
/// [`failing_for`](Self::failing_for). Every request is logged as
/// `(reference, target)`.
#[derive(Debug, Default)]
pub struct FakeResolver {
    poses: Mutex<HashMap<String, Pose>>,
    failures: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pose(self, target: impl Into<String>, pose: Pose) -> Self {
        self.poses.lock().insert(target.into(), pose);
        self
    }

    #[must_use]
    pub fn failing_for(mut self, target: impl Into<String>) -> Self {
        self.failures.insert(target.into());
        self
    }

    #[must_use]
    pub fn with_delay(mut self, target: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(target.into(), delay);
        self
    }

    /// Change a calibration between cycles.
    pub fn set_pose(&self, target: impl Into<String>, pose: Pose) {
        self.poses.lock().insert(target.into(), pose);
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl PoseResolver for FakeResolver {
    async fn resolve_pose(
        &self,
        ctx: &CancellationToken,
        reference: &str,
        target: &str,
    ) -> Result<Pose, BoxError> {
        self.calls
            .lock()
            .push((reference.to_owned(), target.to_owned()));

        if let Some(delay) = self.delays.get(target) {
            tokio::select! {
                () = sleep(*delay) => {}
                () = ctx.cancelled() => return Err("pose lookup cancelled".into()),
            }
        }

        if self.failures.contains(target) {
            return Err(format!("no transform between {reference} and {target}").into());
        }

        self.poses
            .lock()
            .get(target)
            .copied()
            .ok_or_else(|| format!("frame {target} not found").into())
    }
}
