//! Shared scenario fixtures.

use std::sync::Once;

use pa_01_chain_params::ConsensusParams;
use pa_02_proof_of_work::{
    check_proof_of_work, classify, compute_header_hash, lane_version_bits, NativePowHasher,
    PowHasher,
};
use pa_telemetry::{init_tracing, TelemetryConfig};
use shared_types::hashing::sha256d;
use shared_types::{
    hash_from_digest, BlockHeader, BlockId, BlockIndexArena, ChainIndex, CompactTarget,
    HashPrimitive, Lane, NewBlock, PowHashError, H256, HEADER_SIZE,
};

static LOGGING: Once = Once::new();

/// Route scenario logs through the workspace subscriber once per binary.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = init_tracing(&TelemetryConfig::from_env());
    });
}

/// Hasher that covers every lane.
///
/// Argon2d goes through the real backend. The other primitives are stood in
/// for by double SHA-256 over the header and the primitive's name, which is
/// enough to make nonce search meaningful.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScenarioHasher {
    native: NativePowHasher,
}

impl PowHasher for ScenarioHasher {
    fn digest(
        &self,
        primitive: HashPrimitive,
        header: &[u8; HEADER_SIZE],
    ) -> Result<H256, PowHashError> {
        match primitive {
            HashPrimitive::Argon2d => self.native.digest(primitive, header),
            other => {
                let mut data = header.to_vec();
                data.extend_from_slice(other.name().as_bytes());
                Ok(hash_from_digest(sha256d(&data)))
            }
        }
    }
}

/// Hasher that returns one digest for every header.
#[derive(Debug, Clone, Copy)]
pub struct FixedHasher(pub H256);

impl PowHasher for FixedHasher {
    fn digest(&self, _: HashPrimitive, _: &[u8; HEADER_SIZE]) -> Result<H256, PowHashError> {
        Ok(self.0)
    }
}

/// Arena plus the node new blocks are appended to.
#[derive(Debug, Default)]
pub struct ScenarioChain {
    pub arena: BlockIndexArena,
    pub tip: Option<BlockId>,
    synthetic: u64,
}

impl ScenarioChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header that already passed validation.
    pub fn connect(&mut self, header: &BlockHeader) -> BlockId {
        let id = self.arena.push(
            self.tip,
            NewBlock {
                hash: header.identity_hash(),
                time: header.time,
                bits: header.bits,
                version: header.version,
                lane: classify(header.version),
                tx_count: 1,
            },
        );
        self.tip = Some(id);
        id
    }

    /// Append a block without a real header behind it.
    pub fn push_synthetic(&mut self, lane: Lane, time: u32, bits: CompactTarget) -> BlockId {
        self.synthetic += 1;
        let id = self.arena.push(
            self.tip,
            NewBlock {
                hash: H256::from_low_u64_be(self.synthetic),
                time,
                bits,
                version: 2 | lane_version_bits(lane),
                lane,
                tx_count: 1,
            },
        );
        self.tip = Some(id);
        id
    }

    /// Round-robin blocks over every lane, `spacing` seconds apart.
    pub fn push_rounds(&mut self, rounds: u32, start: u32, spacing: u32, bits: CompactTarget) {
        let mut time = start;
        for _ in 0..rounds {
            for lane in Lane::ALL {
                self.push_synthetic(lane, time, bits);
                time += spacing;
            }
        }
    }

    pub fn tip_hash(&self) -> H256 {
        self.tip
            .and_then(|id| self.arena.entry(id))
            .map_or_else(H256::zero, |entry| entry.hash)
    }

    pub fn tip_time(&self) -> u32 {
        self.tip
            .and_then(|id| self.arena.entry(id))
            .map_or(0, |entry| entry.time)
    }

    /// Unmined header extending the tip on `lane`.
    pub fn child_header(&self, lane: Lane, bits: CompactTarget) -> BlockHeader {
        BlockHeader {
            version: 2 | lane_version_bits(lane),
            prev_hash: self.tip_hash(),
            merkle_root: H256::repeat_byte(0x5a),
            time: self.tip_time() + 30,
            bits,
            nonce: 0,
        }
    }
}

/// Bump the nonce until the header meets its own target (`want_valid`) or
/// fails it.
pub fn grind<H: PowHasher>(
    header: &mut BlockHeader,
    params: &ConsensusParams,
    hasher: &H,
    want_valid: bool,
) -> Result<(), PowHashError> {
    let lane = classify(header.version);
    loop {
        let hash = compute_header_hash(header, lane, header.time, params, hasher)?;
        if check_proof_of_work(&hash, lane, header.bits, params) == want_valid {
            return Ok(());
        }
        header.nonce = header.nonce.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pa_01_chain_params::networks;

    #[test]
    fn test_scenario_hasher_separates_primitives() {
        let hasher = ScenarioHasher::default();
        let header = [3u8; HEADER_SIZE];
        let skein = hasher.digest(HashPrimitive::Skein, &header).unwrap();
        let x11 = hasher.digest(HashPrimitive::X11, &header).unwrap();
        assert_ne!(skein, x11);
        assert_eq!(skein, hasher.digest(HashPrimitive::Skein, &header).unwrap());
    }

    #[test]
    fn test_grind_both_ways() {
        let params = networks::regtest_params().unwrap();
        let hasher = ScenarioHasher::default();
        let chain = ScenarioChain::new();
        let lane = Lane::Slot5;

        let mut header = chain.child_header(lane, params.pow_limit_compact(lane));
        grind(&mut header, &params, &hasher, true).unwrap();
        let hash = compute_header_hash(&header, lane, header.time, &params, &hasher).unwrap();
        assert!(check_proof_of_work(&hash, lane, header.bits, &params));

        grind(&mut header, &params, &hasher, false).unwrap();
        let hash = compute_header_hash(&header, lane, header.time, &params, &hasher).unwrap();
        assert!(!check_proof_of_work(&hash, lane, header.bits, &params));
    }
}
