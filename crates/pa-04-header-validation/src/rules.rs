//! Contextual header rules that sit outside proof of work.

use pa_01_chain_params::ConsensusParams;
use shared_types::{BlockHeader, BlockId, ChainIndex, Lane};

use crate::verdict::RejectReason;

/// Version policy for a header at `height`.
///
/// Legacy versions expire at `legacy_blocks_before`, merge mining opens at
/// `start_auxpow_height`, and on strict networks every non-legacy header
/// must carry the network's chain id.
pub fn check_version_policy(
    header: &BlockHeader,
    height: u32,
    params: &ConsensusParams,
) -> Result<(), RejectReason> {
    if header.is_legacy() {
        if !params.allow_legacy_blocks(height) {
            return Err(RejectReason::LegacyVersion { height });
        }
        return Ok(());
    }

    if header.is_auxpow() && height < params.start_auxpow_height {
        return Err(RejectReason::AuxpowTooEarly { height });
    }

    if params.strict_chain_id && header.chain_id() != params.auxpow_chain_id {
        return Err(RejectReason::WrongChainId {
            expected: params.auxpow_chain_id,
            got: header.chain_id(),
        });
    }

    Ok(())
}

/// Number of consecutive blocks ending at `tip` mined under `lane`, stopping
/// once `cap` is reached.
pub fn consecutive_lane_run<I: ChainIndex + ?Sized>(
    index: &I,
    tip: Option<BlockId>,
    lane: Lane,
    cap: u32,
) -> u32 {
    let mut run = 0;
    let mut cursor = tip;
    while let Some(id) = cursor {
        if run >= cap {
            break;
        }
        match index.entry(id) {
            Some(entry) if entry.lane == lane => {
                run += 1;
                cursor = entry.prev;
            }
            _ => break,
        }
    }
    run
}

/// A block at `height` on `lane` may not extend a same-lane run past the
/// limit in force at that height.
pub fn check_sequential_lanes<I: ChainIndex + ?Sized>(
    index: &I,
    tip: Option<BlockId>,
    lane: Lane,
    height: u32,
    params: &ConsensusParams,
) -> Result<(), RejectReason> {
    let Some(limit) = params.sequential_lane_limit(height) else {
        return Ok(());
    };
    if consecutive_lane_run(index, tip, lane, limit) >= limit {
        return Err(RejectReason::TooManySequential { lane, limit });
    }
    Ok(())
}
