// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The merge stage and the default offset composer.

use crate::debug;
use async_trait::async_trait;
use pointfuse_core::{
    BoxError, CancellationToken, Composer, MergeError, PointCloud, Result, ResultExt, SamplePair,
};

/// Hand the complete, ordered pair set to `composer`.
///
/// Runs only after every pair is in. A composer failure is reported as
/// [`MergeError::Composition`], never as a capture or pose error.
///
/// # Errors
///
/// - [`MergeError::Composition`] if the composer fails
/// - [`MergeError::Cancelled`] if `ctx` is cancelled while composing
pub async fn merge_pairs(
    ctx: &CancellationToken,
    composer: &dyn Composer,
    pairs: Vec<SamplePair>,
) -> Result<PointCloud> {
    let inputs = pairs.len();
    debug!("composing {} point clouds", inputs);

    match ctx.run_until_cancelled(composer.compose(ctx, pairs)).await {
        Some(merged) => merged.compose_context(inputs),
        None => Err(MergeError::cancelled("composition")),
    }
}

/// Moves every sample into the reference frame and concatenates them.
///
/// Points keep their color and appear in pair order, so the reference
/// sensor's points come first.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetComposer;

#[async_trait]
impl Composer for OffsetComposer {
    async fn compose(
        &self,
        ctx: &CancellationToken,
        pairs: Vec<SamplePair>,
    ) -> std::result::Result<PointCloud, BoxError> {
        let total = pairs.iter().map(|pair| pair.sample.len()).sum();
        let mut merged = PointCloud::with_capacity(total);

        for pair in pairs {
            if ctx.is_cancelled() {
                return Err("composition cancelled".into());
            }

            if pair.offset.is_identity() {
                merged.extend(pair.sample);
            } else {
                merged.extend(pair.sample.transformed(&pair.offset));
            }
        }

        Ok(merged)
    }
}
