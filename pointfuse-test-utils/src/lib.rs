// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test doubles for the pointfuse workspace.
//!
//! The merger treats sensors, pose resolution and composition as external
//! collaborators. This crate provides in-memory fakes for all three so the
//! orchestration guarantees (configured ordering, all-or-nothing merging,
//! prompt cancellation, closed-state rejection) can be tested without
//! hardware:
//!
//! - [`FakeSensor`] - scripted latency, failures, hangs and panics, with call counters
//! - [`FakeResolver`] - frame table with per-target failures and delays
//! - [`FakeComposer`] - records the pair order it receives
//!
//! For development and testing only.
//!
//! # Example
//!
//! ```rust
//! use pointfuse_test_utils::{fixtures::shift, FakeResolver, FakeSensor};
//!
//! let front = FakeSensor::new("front");
//! let resolver = FakeResolver::new().with_pose("rear", shift(-1.0, 0.0, 0.0));
//! assert_eq!(resolver.call_count(), 0);
//! assert_eq!(front.contacts(), 0);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod fake_composer;
pub mod fake_resolver;
pub mod fake_sensor;
pub mod fixtures;

pub use fake_composer::FakeComposer;
pub use fake_resolver::FakeResolver;
pub use fake_sensor::{Behavior, FakeSensor};
