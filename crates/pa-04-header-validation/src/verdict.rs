//! Validation outcomes.
//!
//! Rejections are expected results, not errors crossing the API boundary;
//! [`RejectReason`] still implements `std::error::Error` so callers can
//! propagate it.

use shared_types::{CompactTarget, Lane, PowHashError};
use thiserror::Error;

/// Why a header was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("Parent block unknown or does not match the header's previous hash")]
    UnknownParent,

    #[error("Legacy block version no longer allowed at height {height}")]
    LegacyVersion { height: u32 },

    #[error("Merge-mined header before auxpow start at height {height}")]
    AuxpowTooEarly { height: u32 },

    #[error("Wrong chain id: expected {expected}, got {got}")]
    WrongChainId { expected: i32, got: i32 },

    #[error("Too many consecutive {lane} blocks (limit {limit})")]
    TooManySequential { lane: Lane, limit: u32 },

    #[error("Incorrect difficulty on {lane}: expected {expected}, got {got}")]
    BadDifficulty {
        lane: Lane,
        expected: CompactTarget,
        got: CompactTarget,
    },

    #[error("Header hash unavailable: {0}")]
    HashUnavailable(PowHashError),

    #[error("Proof of work does not meet claimed target on {lane}")]
    HighHash { lane: Lane },

    #[error("Checkpoint mismatch at height {height}")]
    CheckpointMismatch { height: u32 },
}

impl RejectReason {
    /// Whether the header can never become valid.
    ///
    /// A missing parent may still arrive, and a hash backend failure says
    /// nothing about the header itself.
    pub fn is_permanent(&self) -> bool {
        !matches!(self, Self::UnknownParent | Self::HashUnavailable(_))
    }

    /// Stable short name for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnknownParent => "unknown_parent",
            Self::LegacyVersion { .. } => "legacy_version",
            Self::AuxpowTooEarly { .. } => "auxpow_too_early",
            Self::WrongChainId { .. } => "wrong_chain_id",
            Self::TooManySequential { .. } => "too_many_sequential",
            Self::BadDifficulty { .. } => "bad_difficulty",
            Self::HashUnavailable(_) => "hash_unavailable",
            Self::HighHash { .. } => "high_hash",
            Self::CheckpointMismatch { .. } => "checkpoint_mismatch",
        }
    }
}

/// Result of running a header through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderVerdict {
    Accepted { lane: Lane, height: u32 },
    Rejected(RejectReason),
    /// Merge-mined header that passed every local check; the parent-chain
    /// proof must be verified by the caller.
    DeferredAuxpow { lane: Lane, height: u32 },
}

impl HeaderVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<RejectReason> for HeaderVerdict {
    fn from(reason: RejectReason) -> Self {
        Self::Rejected(reason)
    }
}
