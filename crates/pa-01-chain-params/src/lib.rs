//! # Chain Parameters (Subsystem 01)
//!
//! **Bounded Context:** Network Configuration
//!
//! ## Purpose
//!
//! Defines what each network *is*: the flat [`ConsensusParams`] value, the
//! genesis block rebuilt from its documented inputs, the checkpoint table and
//! the informational wire constants, bundled as a self-validating
//! [`NetworkProfile`].
//!
//! ## Networks
//!
//! | Network | Genesis | Retargeting | Legacy versions |
//! |---------|---------|-------------|-----------------|
//! | main    | `d8a2b243…` | on | before 456015 |
//! | test    | `79b11e94…` | on, min-difficulty flag set | always |
//! | regtest | `2273ea41…` | off | always |
//!
//! ## Lifecycle
//!
//! 1. [`CoreConfig::from_env`] (or a deserialised config) picks the network.
//! 2. [`NetworkProfile::build`] rebuilds genesis and fails fatally on any
//!    hash or merkle mismatch.
//! 3. Optionally, [`select_network`] / [`install_profile`] publish the profile
//!    process-wide, exactly once.

pub mod config;
pub mod domain;
pub mod registry;

pub use config::{ActivationOverride, CoreConfig};
pub use domain::*;
pub use registry::{current_profile, install_profile, select_network, try_current_profile};
