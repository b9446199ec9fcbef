// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrent capture-and-pose pairing.
//!
//! One task is spawned per configured sensor. Each task captures a sample and
//! resolves that sensor's offset to the reference frame concurrently, then
//! reports back with its configured index. Results are slotted by index so
//! the pairs come out in configured order no matter which sensor answers
//! first.
//!
//! # Failure policy
//!
//! The stage fails fast: the first task error, in completion order, cancels
//! every sibling and becomes the cycle's error. Nothing is merged from a
//! cycle that lost a sensor.
//!
//! # Cancellation
//!
//! Tasks receive a cycle-scoped [`CancellationToken`] and race their work
//! against it. The token is cancelled when the caller's context is
//! cancelled, when any task fails, and when the stage future is dropped
//! (for example by a timeout), so no task outlives its cycle.

use crate::{debug, error, warn};
use futures::future::try_join;
use futures::stream::{FuturesUnordered, StreamExt};
use pointfuse_core::{
    CancellationToken, ConfigError, MergeError, Pose, PoseResolver, Result, ResultExt,
    SamplePair, SensorRef,
};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Cancels the cycle token when dropped, releasing every sensor task.
struct CycleGuard {
    cycle: CancellationToken,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        self.cycle.cancel();
    }
}

/// Capture one sample from every sensor and pair it with its offset.
///
/// `sensors[0]` is the reference sensor: its offset is the identity and is
/// not requested from `resolver`. Every other sensor's offset is resolved
/// fresh for this call.
///
/// # Errors
///
/// - [`MergeError::Cancelled`] if `ctx` is cancelled before every pair is in
/// - [`MergeError::SensorCapture`] / [`MergeError::PoseResolution`] for the
///   first sensor that fails
/// - [`MergeError::TaskFailed`] if a sensor task panics
/// - [`ConfigError::EmptySensorList`] if `sensors` is empty
pub async fn capture_pairs(
    ctx: &CancellationToken,
    sensors: &[SensorRef],
    resolver: &Arc<dyn PoseResolver>,
) -> Result<Vec<SamplePair>> {
    let reference: Arc<str> = match sensors.first() {
        Some(first) => Arc::from(first.name()),
        None => return Err(ConfigError::EmptySensorList.into()),
    };

    if ctx.is_cancelled() {
        return Err(MergeError::cancelled("capture"));
    }

    debug!(
        "capturing from {} cameras into frame {}",
        sensors.len(),
        reference
    );

    let cycle = CancellationToken::new();
    let handles: Vec<JoinHandle<Result<SamplePair>>> = sensors
        .iter()
        .enumerate()
        .map(|(index, sensor)| {
            tokio::spawn(pair_sensor(
                index,
                sensor.clone(),
                resolver.clone(),
                reference.clone(),
                cycle.clone(),
            ))
        })
        .collect();

    let _guard = CycleGuard { cycle };

    let mut pending: FuturesUnordered<_> = handles
        .into_iter()
        .enumerate()
        .map(|(index, handle)| async move { (index, handle.await) })
        .collect();

    let mut slots: Vec<Option<SamplePair>> = (0..sensors.len()).map(|_| None).collect();

    loop {
        let next = tokio::select! {
            biased;
            () = ctx.cancelled() => {
                debug!("capture cancelled by caller with {} cameras outstanding", pending.len());
                return Err(MergeError::cancelled("capture"));
            }
            next = pending.next() => next,
        };

        let Some((index, joined)) = next else {
            break;
        };

        match joined {
            Ok(Ok(pair)) => {
                debug!("camera {} paired ({} points)", pair.sensor, pair.sample.len());
                slots[index] = Some(pair);
            }
            Ok(Err(error)) => {
                warn!(
                    "aborting cycle, {} sibling cameras cancelled: {}",
                    pending.len(),
                    error
                );
                return Err(error);
            }
            Err(join_error) => {
                let sensor = sensors[index].name();
                error!("capture task for camera {} died: {}", sensor, join_error);
                return Err(MergeError::task_failed(sensor, join_error.to_string()));
            }
        }
    }

    slots
        .into_iter()
        .zip(sensors)
        .map(|(slot, sensor)| {
            slot.ok_or_else(|| MergeError::task_failed(sensor.name(), "no sample produced"))
        })
        .collect()
}

async fn pair_sensor(
    index: usize,
    sensor: SensorRef,
    resolver: Arc<dyn PoseResolver>,
    reference: Arc<str>,
    cycle: CancellationToken,
) -> Result<SamplePair> {
    let name = sensor.name().to_owned();

    let capture = async {
        sensor
            .next_point_cloud(&cycle)
            .await
            .capture_context(&name)
    };

    let resolve = async {
        if index == 0 {
            return Ok(Pose::IDENTITY);
        }
        resolver
            .resolve_pose(&cycle, &reference, &name)
            .await
            .pose_context(&reference, &name)
    };

    let outcome = cycle.run_until_cancelled(try_join(capture, resolve)).await;
    match outcome {
        Some(Ok((sample, offset))) => Ok(SamplePair {
            sensor: name,
            sample,
            offset,
        }),
        Some(Err(error)) => Err(error),
        None => Err(MergeError::cancelled(format!("capture from camera {name}"))),
    }
}
