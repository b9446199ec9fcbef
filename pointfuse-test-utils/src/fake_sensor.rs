// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scriptable in-memory sensor.

use async_trait::async_trait;
use parking_lot::Mutex;
use pointfuse_core::{BoxError, CancellationToken, PointCloud, Properties, Sensor};
use std::future::pending;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// What a [`FakeSensor`] does when asked for a point cloud.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Return the configured cloud
    Respond,
    /// Return an error with this message
    Fail(String),
    /// Wait until the context is cancelled, then fail
    Hang,
    /// Never return, ignoring the context
    Stall,
    /// Panic inside the capture call
    Panic,
}

/// A sensor whose answers, latency and failures are set up front.
///
/// Every call is counted so tests can assert which sensors were contacted.
///
/// # Example
///
/// ```rust
/// use pointfuse_test_utils::FakeSensor;
/// use pointfuse_test_utils::fixtures::cloud_at;
/// use std::time::Duration;
///
/// let sensor = FakeSensor::new("left")
///     .with_cloud(cloud_at(1.0, 0.0, 0.0))
///     .with_delay(Duration::from_millis(20));
/// assert_eq!(sensor.capture_calls(), 0);
/// ```
#[derive(Debug)]
pub struct FakeSensor {
    name: String,
    cloud: Mutex<PointCloud>,
    behavior: Behavior,
    delay: Duration,
    properties: Properties,
    properties_failure: Option<String>,
    properties_stall: bool,
    capture_calls: AtomicUsize,
    properties_calls: AtomicUsize,
    cancellations: AtomicUsize,
}

impl FakeSensor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cloud: Mutex::new(PointCloud::new()),
            behavior: Behavior::Respond,
            delay: Duration::ZERO,
            properties: Properties {
                supports_point_cloud: true,
            },
            properties_failure: None,
            properties_stall: false,
            capture_calls: AtomicUsize::new(0),
            properties_calls: AtomicUsize::new(0),
            cancellations: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_cloud(self, cloud: PointCloud) -> Self {
        *self.cloud.lock() = cloud;
        self
    }

    /// Latency applied before answering; cut short by cancellation.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.behavior = Behavior::Fail(message.into());
        self
    }

    #[must_use]
    pub fn hanging(mut self) -> Self {
        self.behavior = Behavior::Hang;
        self
    }

    #[must_use]
    pub fn stalling(mut self) -> Self {
        self.behavior = Behavior::Stall;
        self
    }

    #[must_use]
    pub fn panicking(mut self) -> Self {
        self.behavior = Behavior::Panic;
        self
    }

    #[must_use]
    pub fn without_point_cloud_support(mut self) -> Self {
        self.properties.supports_point_cloud = false;
        self
    }

    #[must_use]
    pub fn failing_properties(mut self, message: impl Into<String>) -> Self {
        self.properties_failure = Some(message.into());
        self
    }

    /// Properties queries never answer and ignore cancellation.
    #[must_use]
    pub fn stalling_properties(mut self) -> Self {
        self.properties_stall = true;
        self
    }

    /// Swap the cloud returned by later captures.
    pub fn set_cloud(&self, cloud: PointCloud) {
        *self.cloud.lock() = cloud;
    }

    pub fn capture_calls(&self) -> usize {
        self.capture_calls.load(Ordering::SeqCst)
    }

    pub fn properties_calls(&self) -> usize {
        self.properties_calls.load(Ordering::SeqCst)
    }

    /// Number of captures that stopped because the context was cancelled.
    pub fn cancellations(&self) -> usize {
        self.cancellations.load(Ordering::SeqCst)
    }

    /// Total calls of any kind.
    pub fn contacts(&self) -> usize {
        self.capture_calls() + self.properties_calls()
    }

    async fn wait(&self, ctx: &CancellationToken, duration: Duration) -> Result<(), BoxError> {
        if duration.is_zero() {
            return Ok(());
        }
        tokio::select! {
            () = sleep(duration) => Ok(()),
            () = ctx.cancelled() => {
                self.cancellations.fetch_add(1, Ordering::SeqCst);
                Err(format!("{} cancelled", self.name).into())
            }
        }
    }
}

#[async_trait]
impl Sensor for FakeSensor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn properties(&self, _ctx: &CancellationToken) -> Result<Properties, BoxError> {
        self.properties_calls.fetch_add(1, Ordering::SeqCst);
        if self.properties_stall {
            pending::<()>().await;
        }
        match &self.properties_failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(self.properties),
        }
    }

    async fn next_point_cloud(&self, ctx: &CancellationToken) -> Result<PointCloud, BoxError> {
        self.capture_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(ctx, self.delay).await?;

        match &self.behavior {
            Behavior::Respond => Ok(self.cloud.lock().clone()),
            Behavior::Fail(message) => Err(message.clone().into()),
            Behavior::Hang => {
                ctx.cancelled().await;
                self.cancellations.fetch_add(1, Ordering::SeqCst);
                Err(format!("{} cancelled", self.name).into())
            }
            Behavior::Stall => pending().await,
            Behavior::Panic => panic!("{} exploded", self.name),
        }
    }
}
