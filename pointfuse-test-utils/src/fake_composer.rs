// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use parking_lot::Mutex;
use pointfuse_core::{BoxError, CancellationToken, Composer, PointCloud, SamplePair};

/// Records the pairs it is given and concatenates the transformed samples.
#[derive(Debug, Default)]
pub struct FakeComposer {
    failure: Option<String>,
    received: Mutex<Vec<Vec<SamplePair>>>,
}

impl FakeComposer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.received.lock().len()
    }

    /// Pairs from the most recent call.
    pub fn last_pairs(&self) -> Option<Vec<SamplePair>> {
        self.received.lock().last().cloned()
    }

    /// Sensor order of the most recent call.
    pub fn last_order(&self) -> Vec<String> {
        self.last_pairs()
            .unwrap_or_default()
            .into_iter()
            .map(|pair| pair.sensor)
            .collect()
    }
}

#[async_trait]
impl Composer for FakeComposer {
    async fn compose(
        &self,
        _ctx: &CancellationToken,
        pairs: Vec<SamplePair>,
    ) -> Result<PointCloud, BoxError> {
        self.received.lock().push(pairs.clone());

        if let Some(message) = &self.failure {
            return Err(message.clone().into());
        }

        Ok(pairs
            .iter()
            .flat_map(|pair| pair.sample.transformed(&pair.offset))
            .collect())
    }
}
