//! Proof-of-work check.

use pa_01_chain_params::ConsensusParams;
use shared_types::{hash_to_u256, CompactTarget, Lane, H256};

/// Whether `bits` is a legal target for `lane` and `hash` meets it.
///
/// Negative, zero and overflowing encodings are illegal, as is any target
/// easier than the lane limit.
pub fn check_proof_of_work(
    hash: &H256,
    lane: Lane,
    bits: CompactTarget,
    params: &ConsensusParams,
) -> bool {
    let decoded = bits.decode();
    if !decoded.is_valid() || decoded.target > params.pow_limit(lane) {
        return false;
    }
    hash_to_u256(hash) <= decoded.target
}
