//! # Checkpoints (Subsystem 03)
//!
//! Defense against deep reorganisations using hard-pinned anchors.
//!
//! ## Threat: History Rewrite
//!
//! An attacker with enough hash power (or a cheap old lane) mines an
//! alternative history from far back. Checkpoints pin `(height, hash)`
//! pairs into the node software; any chain disagreeing with a pin is
//! rejected permanently.
//!
//! ## Progress Estimation
//!
//! The same table records how many transactions existed at the last pin and
//! how fast they arrive afterwards, which is enough to estimate how far a
//! syncing node has come. Transactions before the last pin are assumed
//! cheaper to validate than those after it.

use chrono::Utc;
use pa_01_chain_params::{CheckpointSet, NetworkProfile};
use shared_types::{BlockId, ChainIndex, H256};
use tracing::warn;

/// How many times slower transactions after the last checkpoint are
/// expected to validate.
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

/// Checkpoint enforcement over one network's table.
#[derive(Debug, Clone, Copy)]
pub struct CheckpointGuard<'a> {
    checkpoints: &'a CheckpointSet,
    enabled: bool,
}

impl<'a> CheckpointGuard<'a> {
    pub fn new(checkpoints: &'a CheckpointSet, enabled: bool) -> Self {
        Self {
            checkpoints,
            enabled,
        }
    }

    pub fn for_profile(profile: &'a NetworkProfile, enabled: bool) -> Self {
        Self::new(&profile.checkpoints, enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a block at `height` with `hash` is consistent with the pins.
    ///
    /// `false` is final: the chain containing this block must be rejected.
    pub fn check_block(&self, height: u32, hash: &H256) -> bool {
        if !self.enabled {
            return true;
        }
        match self.checkpoints.get(height) {
            None => true,
            Some(pinned) if pinned == hash => true,
            Some(pinned) => {
                warn!(height, expected = ?pinned, got = ?hash, "Checkpoint mismatch");
                false
            }
        }
    }

    /// Highest pinned height; 0 when enforcement is disabled.
    pub fn total_blocks_estimate(&self) -> u32 {
        if !self.enabled {
            return 0;
        }
        self.checkpoints.last_height().unwrap_or(0)
    }

    /// Estimated fraction of validation work done once `node` is connected.
    pub fn verification_progress<I: ChainIndex + ?Sized>(
        &self,
        index: &I,
        node: Option<BlockId>,
        expensive: bool,
    ) -> f64 {
        self.verification_progress_at(index, node, expensive, Utc::now().timestamp())
    }

    /// [`Self::verification_progress`] against an explicit clock.
    pub fn verification_progress_at<I: ChainIndex + ?Sized>(
        &self,
        index: &I,
        node: Option<BlockId>,
        expensive: bool,
        now: i64,
    ) -> f64 {
        let Some(entry) = node.and_then(|id| index.entry(id)) else {
            return 0.0;
        };

        let factor = if expensive {
            SIGCHECK_VERIFICATION_FACTOR
        } else {
            1.0
        };
        let rate = self.checkpoints.tx_rate.per_second();
        let last_tx = self.checkpoints.last_checkpoint_tx;
        let chain_tx = entry.chain_tx;

        let (work_before, work_after) = if chain_tx <= last_tx {
            let cheap_before = chain_tx as f64;
            let cheap_after = (last_tx - chain_tx) as f64;
            let elapsed = (now - self.checkpoints.last_checkpoint_time).max(0);
            let expensive_after = elapsed as f64 * rate;
            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = last_tx as f64;
            let expensive_before = (chain_tx - last_tx) as f64;
            let elapsed = (now - entry.block_time()).max(0);
            let expensive_after = elapsed as f64 * rate;
            (
                cheap_before + expensive_before * factor,
                expensive_after * factor,
            )
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        (work_before / total).clamp(0.0, 1.0)
    }

    /// Highest checkpoint whose block the caller already knows.
    ///
    /// `lookup` maps a pinned hash to the caller's node handle.
    pub fn find_last_checkpoint_node<N, F>(&self, lookup: F) -> Option<N>
    where
        F: Fn(&H256) -> Option<N>,
    {
        if !self.enabled {
            return None;
        }
        self.checkpoints
            .iter_descending()
            .find_map(|(_, hash)| lookup(hash))
    }
}
