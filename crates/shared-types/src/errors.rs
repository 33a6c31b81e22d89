//! # Error Types
//!
//! Errors shared across crates. Validation outcomes are never errors; only
//! configuration faults and hash-backend faults are represented here.

use thiserror::Error;

use crate::entities::HashPrimitive;

/// Fatal configuration errors. Any of these must abort startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Network id not one of main/test/regtest.
    #[error("Unknown network id: {0}")]
    UnknownNetwork(String),

    /// Rebuilt genesis hash differs from the compiled-in value.
    #[error("Genesis hash mismatch on {network}: expected {expected}, computed {computed}")]
    GenesisHashMismatch {
        network: String,
        expected: String,
        computed: String,
    },

    /// Rebuilt genesis merkle root differs from the compiled-in value.
    #[error("Genesis merkle root mismatch on {network}: expected {expected}, computed {computed}")]
    GenesisMerkleMismatch {
        network: String,
        expected: String,
        computed: String,
    },

    /// A compiled-in or configured hash literal failed to parse.
    #[error("Invalid hash literal: {0}")]
    InvalidHash(String),

    /// A network profile was already selected for this process.
    #[error("Network profile already selected: active {active}, requested {requested}")]
    AlreadySelected { active: String, requested: String },

    /// Activation-window overrides are only accepted on regtest.
    #[error("Activation window overrides are regtest-only (network: {0})")]
    OverrideNotPermitted(String),

    /// Deployment name not recognised.
    #[error("Unknown deployment: {0}")]
    UnknownDeployment(String),

    /// Parameter combination violates a structural invariant.
    #[error("Invalid consensus parameters: {0}")]
    InvalidParams(String),
}

/// Failures computing a lane's header hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowHashError {
    /// The configured hasher backend does not implement this primitive.
    #[error("Hash primitive {0} not supported by this backend")]
    Unsupported(HashPrimitive),

    /// The primitive rejected its parameters or input.
    #[error("Hash primitive {primitive} failed: {reason}")]
    Backend {
        primitive: HashPrimitive,
        reason: String,
    },
}

impl ConfigError {
    /// Whether the error came from genesis self-validation.
    pub fn is_genesis_mismatch(&self) -> bool {
        matches!(
            self,
            Self::GenesisHashMismatch { .. } | Self::GenesisMerkleMismatch { .. }
        )
    }
}
