//! # Header Validation (Subsystem 04)
//!
//! **Bounded Context:** Contextual Header Acceptance
//!
//! ## Purpose
//!
//! Composes the lane selector, the difficulty engine, the proof-of-work check
//! and the checkpoint guard into one pipeline that turns a candidate header
//! into a [`HeaderVerdict`].
//!
//! ## Pipeline
//!
//! ```text
//! parent lookup ─► classify ─► version policy ─► sequential-lane rule
//!                                                        │
//!       checkpoint ◄─ proof of work ◄─ header hash ◄─ required target
//! ```
//!
//! Every step that fails yields a distinct [`RejectReason`]. Merge-mined
//! headers skip the local hash check and come back as
//! [`HeaderVerdict::DeferredAuxpow`].

pub mod metrics;
pub mod rules;
pub mod validator;
pub mod verdict;

pub use metrics::ValidationMetrics;
pub use rules::{check_sequential_lanes, check_version_policy, consecutive_lane_run};
pub use validator::HeaderValidator;
pub use verdict::{HeaderVerdict, RejectReason};
