//! Multi-crate scenarios.

pub mod genesis;
pub mod pipeline;
pub mod retargeting;
