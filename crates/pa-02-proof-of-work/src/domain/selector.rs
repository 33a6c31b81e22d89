//! Algorithm Selector
//!
//! Maps a header onto one of the five mining lanes and picks the hash
//! primitive that lane uses at a given header time.
//!
//! ## Version Layout
//!
//! ```text
//!  31            16 15     12 11   9 8 7          0
//! ┌────────────────┬─────────┬──────┬─┬────────────┐
//! │   chain id     │ unused  │ lane │A│ base ver.  │
//! └────────────────┴─────────┴──────┴─┴────────────┘
//!                                    A = auxpow flag
//! ```

use pa_01_chain_params::ConsensusParams;
use shared_types::{BlockHeader, HashPrimitive, Lane, PowHashError, H256};

use crate::ports::PowHasher;

/// Bits of the version field that carry the lane.
pub const BLOCK_VERSION_LANE_MASK: i32 = 7 << 9;
pub const BLOCK_VERSION_SLOT2: i32 = 1 << 9;
pub const BLOCK_VERSION_SLOT3: i32 = 2 << 9;
pub const BLOCK_VERSION_SLOT4: i32 = 3 << 9;
pub const BLOCK_VERSION_SLOT5: i32 = 4 << 9;

/// Lane a header version was mined under. Unassigned patterns fall back to
/// lane 1.
pub fn classify(version: i32) -> Lane {
    match version & BLOCK_VERSION_LANE_MASK {
        BLOCK_VERSION_SLOT2 => Lane::Slot2,
        BLOCK_VERSION_SLOT3 => Lane::Slot3,
        BLOCK_VERSION_SLOT4 => Lane::Slot4,
        BLOCK_VERSION_SLOT5 => Lane::Slot5,
        _ => Lane::Slot1,
    }
}

/// Version bits a miner sets to mine under `lane`.
pub fn lane_version_bits(lane: Lane) -> i32 {
    match lane {
        Lane::Slot1 => 0,
        Lane::Slot2 => BLOCK_VERSION_SLOT2,
        Lane::Slot3 => BLOCK_VERSION_SLOT3,
        Lane::Slot4 => BLOCK_VERSION_SLOT4,
        Lane::Slot5 => BLOCK_VERSION_SLOT5,
    }
}

/// Hash primitive for `lane` at header time `time`.
pub fn hash_primitive(lane: Lane, time: u32, params: &ConsensusParams) -> HashPrimitive {
    if let Some(switch) = params.primitive_switch(lane) {
        return switch.primitive_at(time);
    }
    match lane {
        Lane::Slot1 => HashPrimitive::Blake,
        Lane::Slot2 => HashPrimitive::Skein,
        Lane::Slot3 => HashPrimitive::Qubit,
        Lane::Slot4 => HashPrimitive::Yescrypt,
        Lane::Slot5 => HashPrimitive::X11,
    }
}

pub fn algorithm_name(lane: Lane, time: u32, params: &ConsensusParams) -> &'static str {
    hash_primitive(lane, time, params).name()
}

/// Proof-of-work digest of `header` under the primitive selected for
/// `lane` at `time`.
pub fn compute_header_hash<H: PowHasher + ?Sized>(
    header: &BlockHeader,
    lane: Lane,
    time: u32,
    params: &ConsensusParams,
    hasher: &H,
) -> Result<H256, PowHashError> {
    let primitive = hash_primitive(lane, time, params);
    hasher.digest(primitive, &header.serialize())
}
