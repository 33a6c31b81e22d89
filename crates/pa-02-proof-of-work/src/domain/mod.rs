//! Domain layer: lane selection, retargeting and the proof-of-work check.

pub mod difficulty;
pub mod selector;
pub mod verifier;

pub use difficulty::{calculate_next_work, next_target, DifficultyEngine};
pub use selector::{
    algorithm_name, classify, compute_header_hash, hash_primitive, lane_version_bits,
    BLOCK_VERSION_LANE_MASK, BLOCK_VERSION_SLOT2, BLOCK_VERSION_SLOT3, BLOCK_VERSION_SLOT4,
    BLOCK_VERSION_SLOT5,
};
pub use verifier::check_proof_of_work;
