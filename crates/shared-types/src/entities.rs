//! # Core Domain Entities
//!
//! Header record, mining lanes, hash primitives and network identifiers.
//!
//! ## Byte order
//!
//! Hashes are kept in display order. A header serializes its previous-hash
//! and merkle-root fields reversed, so that the 80-byte image matches the
//! persisted wire format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compact::CompactTarget;
use crate::errors::ConfigError;
use crate::hashing::sha256d;

// Re-export the 256-bit types from primitive-types for use across all crates
pub use primitive_types::{H256, U256};

/// Number of independent mining lanes.
pub const LANE_COUNT: usize = 5;

/// Size of the serialized header image (version through nonce).
pub const HEADER_SIZE: usize = 80;

/// Version bit marking a merge-mined (auxpow) header.
pub const VERSION_AUXPOW: i32 = 1 << 8;

/// Multiplier placing the merge-mining chain id in the upper 16 version bits.
pub const VERSION_CHAIN_START: i32 = 1 << 16;

// =============================================================================
// HASH HELPERS
// =============================================================================

/// Parse a display-order hex hash, with or without a `0x` prefix.
pub fn hash_from_hex(input: &str) -> Result<H256, ConfigError> {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(digits).map_err(|_| ConfigError::InvalidHash(input.to_string()))?;
    if bytes.len() != 32 {
        return Err(ConfigError::InvalidHash(input.to_string()));
    }
    Ok(H256::from_slice(&bytes))
}

/// Convert a raw digest (little-endian wire order) into a display-order hash.
pub fn hash_from_digest(mut digest: [u8; 32]) -> H256 {
    digest.reverse();
    H256(digest)
}

/// Convert a display-order hash back into wire order.
pub fn hash_to_wire(hash: &H256) -> [u8; 32] {
    let mut bytes = hash.0;
    bytes.reverse();
    bytes
}

/// Interpret a hash as an unsigned 256-bit integer.
#[inline]
pub fn hash_to_u256(hash: &H256) -> U256 {
    U256::from_big_endian(hash.as_bytes())
}

/// Convert a 256-bit integer into a display-order hash.
pub fn u256_to_hash(value: U256) -> H256 {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    H256(bytes)
}

// =============================================================================
// MINING LANES
// =============================================================================

/// One of the five independent mining-algorithm slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lane {
    /// Blake, later Lyra2RE2. The default for unmapped version bits.
    Slot1,
    /// Skein.
    Slot2,
    /// Qubit, later Argon2d.
    Slot3,
    /// Yescrypt.
    Slot4,
    /// X11.
    Slot5,
}

impl Lane {
    /// All lanes in slot order.
    pub const ALL: [Lane; LANE_COUNT] = [
        Lane::Slot1,
        Lane::Slot2,
        Lane::Slot3,
        Lane::Slot4,
        Lane::Slot5,
    ];

    /// Zero-based index, used to address per-lane parameter arrays.
    pub fn index(self) -> usize {
        match self {
            Lane::Slot1 => 0,
            Lane::Slot2 => 1,
            Lane::Slot3 => 2,
            Lane::Slot4 => 3,
            Lane::Slot5 => 4,
        }
    }

    /// One-based lane number.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Lane for a one-based lane number.
    pub fn from_number(number: u8) -> Option<Lane> {
        Lane::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lane{}", self.number())
    }
}

/// Concrete header-hash primitive a lane mines with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashPrimitive {
    Blake,
    Lyra2Re2,
    Skein,
    Qubit,
    Argon2d,
    Yescrypt,
    X11,
}

impl HashPrimitive {
    /// Human-readable algorithm name.
    pub fn name(self) -> &'static str {
        match self {
            HashPrimitive::Blake => "Blake",
            HashPrimitive::Lyra2Re2 => "Lyra2RE2",
            HashPrimitive::Skein => "Skein",
            HashPrimitive::Qubit => "Qubit",
            HashPrimitive::Argon2d => "Argon2d",
            HashPrimitive::Yescrypt => "Yescrypt",
            HashPrimitive::X11 => "X11",
        }
    }
}

impl fmt::Display for HashPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// NETWORKS
// =============================================================================

/// Network discriminant selecting one fixed profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    #[default]
    Main,
    Test,
    Regtest,
}

impl NetworkId {
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Test => "test",
            NetworkId::Regtest => "regtest",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkId::Main),
            "test" | "testnet" => Ok(NetworkId::Test),
            "regtest" => Ok(NetworkId::Regtest),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

// =============================================================================
// BLOCK HEADER
// =============================================================================

/// The fixed-size header record every lane hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Version field: base version, auxpow flag, lane bits and chain id.
    pub version: i32,
    /// Hash of the previous block.
    pub prev_hash: H256,
    /// Merkle root of the block's transactions.
    pub merkle_root: H256,
    /// Block timestamp (Unix seconds).
    pub time: u32,
    /// Claimed target in compact form.
    pub bits: CompactTarget,
    pub nonce: u32,
}

impl BlockHeader {
    /// Canonical 80-byte serialization (version through nonce).
    pub fn serialize(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..36].copy_from_slice(&hash_to_wire(&self.prev_hash));
        bytes[36..68].copy_from_slice(&hash_to_wire(&self.merkle_root));
        bytes[68..72].copy_from_slice(&self.time.to_le_bytes());
        bytes[72..76].copy_from_slice(&self.bits.to_u32().to_le_bytes());
        bytes[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    /// Block identity hash: double SHA-256 over the serialized header.
    ///
    /// Independent of the mining lane; this is the hash checkpoints pin.
    pub fn identity_hash(&self) -> H256 {
        hash_from_digest(sha256d(&self.serialize()))
    }

    /// Merge-mining chain id carried in the upper version bits.
    pub fn chain_id(&self) -> i32 {
        self.version / VERSION_CHAIN_START
    }

    /// Whether the header claims a merge-mined proof.
    pub fn is_auxpow(&self) -> bool {
        self.version & VERSION_AUXPOW != 0
    }

    /// Version with lane bits, auxpow flag and chain id stripped.
    pub fn base_version(&self) -> i32 {
        self.version % VERSION_AUXPOW
    }

    /// A legacy header carries neither an auxpow flag nor a chain id.
    pub fn is_legacy(&self) -> bool {
        !self.is_auxpow() && self.chain_id() == 0
    }

    /// Set the base version and chain id, clearing any previous version bits.
    ///
    /// Returns `false` and leaves the header untouched when `base_version` is
    /// out of `[1, VERSION_AUXPOW)` or the header already claims auxpow.
    pub fn set_base_version(&mut self, base_version: i32, chain_id: i32) -> bool {
        if !(1..VERSION_AUXPOW).contains(&base_version) || self.is_auxpow() {
            return false;
        }
        self.version = base_version | (chain_id * VERSION_CHAIN_START);
        true
    }
}
