//! Outbound ports (driven side - SPI)

use shared_types::{HashPrimitive, PowHashError, H256, HEADER_SIZE};

/// Port: the cryptographic hash primitives behind each lane.
///
/// Implementations receive the canonical 80-byte header serialization and
/// return the digest in display order (see [`shared_types::hash_from_digest`]).
pub trait PowHasher: Send + Sync {
    fn digest(
        &self,
        primitive: HashPrimitive,
        header: &[u8; HEADER_SIZE],
    ) -> Result<H256, PowHashError>;
}
