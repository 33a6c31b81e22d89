//! The header validation pipeline.

use pa_01_chain_params::NetworkProfile;
use pa_02_proof_of_work::{
    check_proof_of_work, classify, compute_header_hash, DifficultyEngine, PowHasher,
};
use pa_03_checkpoints::CheckpointGuard;
use shared_types::{BlockHeader, BlockId, ChainIndex, Lane, H256};
use tracing::{debug, warn};

use crate::metrics::ValidationMetrics;
use crate::rules::{check_sequential_lanes, check_version_policy};
use crate::verdict::{HeaderVerdict, RejectReason};

/// Runs candidate headers through every consensus check of one network.
///
/// Holds no chain state: the caller passes its chain index and the node the
/// header claims to extend on every call.
pub struct HeaderValidator<'a, H: PowHasher> {
    profile: &'a NetworkProfile,
    hasher: H,
    difficulty: DifficultyEngine<'a>,
    checkpoints: CheckpointGuard<'a>,
    metrics: ValidationMetrics,
}

impl<'a, H: PowHasher> HeaderValidator<'a, H> {
    pub fn new(profile: &'a NetworkProfile, hasher: H, checkpoints_enabled: bool) -> Self {
        Self {
            profile,
            hasher,
            difficulty: DifficultyEngine::new(&profile.params),
            checkpoints: CheckpointGuard::for_profile(profile, checkpoints_enabled),
            metrics: ValidationMetrics::new(),
        }
    }

    pub fn profile(&self) -> &'a NetworkProfile {
        self.profile
    }

    pub fn checkpoints(&self) -> &CheckpointGuard<'a> {
        &self.checkpoints
    }

    pub fn metrics(&self) -> &ValidationMetrics {
        &self.metrics
    }

    /// Validate `header` as the child of `tip`.
    ///
    /// `tip` is `None` only for a genesis candidate, whose previous hash must
    /// then be zero.
    pub fn validate<I: ChainIndex + ?Sized>(
        &self,
        index: &I,
        tip: Option<BlockId>,
        header: &BlockHeader,
    ) -> HeaderVerdict {
        let verdict = match self.run(index, tip, header) {
            Ok(verdict) => verdict,
            Err(reason) => {
                warn!(
                    network = %self.profile.id,
                    reason = reason.label(),
                    permanent = reason.is_permanent(),
                    "Header rejected: {}",
                    reason
                );
                HeaderVerdict::Rejected(reason)
            }
        };
        self.metrics.record_verdict(&verdict);
        verdict
    }

    fn run<I: ChainIndex + ?Sized>(
        &self,
        index: &I,
        tip: Option<BlockId>,
        header: &BlockHeader,
    ) -> Result<HeaderVerdict, RejectReason> {
        let params = &self.profile.params;
        let height = resolve_height(index, tip, &header.prev_hash)?;

        let lane = classify(header.version);
        check_version_policy(header, height, params)?;
        check_sequential_lanes(index, tip, lane, height, params)?;
        self.check_difficulty(index, tip, lane, header)?;

        let auxpow = header.is_auxpow();
        if !auxpow {
            let hash = compute_header_hash(header, lane, header.time, params, &self.hasher)
                .map_err(RejectReason::HashUnavailable)?;
            if !check_proof_of_work(&hash, lane, header.bits, params) {
                return Err(RejectReason::HighHash { lane });
            }
        }

        if !self.checkpoints.check_block(height, &header.identity_hash()) {
            return Err(RejectReason::CheckpointMismatch { height });
        }

        debug!(%lane, height, bits = %header.bits, auxpow, "Header passed validation");
        Ok(if auxpow {
            HeaderVerdict::DeferredAuxpow { lane, height }
        } else {
            HeaderVerdict::Accepted { lane, height }
        })
    }

    fn check_difficulty<I: ChainIndex + ?Sized>(
        &self,
        index: &I,
        tip: Option<BlockId>,
        lane: Lane,
        header: &BlockHeader,
    ) -> Result<(), RejectReason> {
        let expected = self.difficulty.required_target(index, tip, lane);
        if header.bits == expected {
            return Ok(());
        }
        Err(RejectReason::BadDifficulty {
            lane,
            expected,
            got: header.bits,
        })
    }
}

/// Height of a header extending `tip`, checking the header actually names it.
fn resolve_height<I: ChainIndex + ?Sized>(
    index: &I,
    tip: Option<BlockId>,
    prev_hash: &H256,
) -> Result<u32, RejectReason> {
    match tip {
        None if prev_hash.is_zero() => Ok(0),
        None => Err(RejectReason::UnknownParent),
        Some(id) => match index.entry(id) {
            Some(parent) if parent.hash == *prev_hash => Ok(parent.height + 1),
            _ => Err(RejectReason::UnknownParent),
        },
    }
}
