//! Genesis Block Creation
//!
//! Deterministically rebuilds a network's genesis block from its documented
//! inputs. The genesis coinbase output is never spendable; the block only
//! seeds the chain.

use shared_types::hashing::sha256d;
use shared_types::{hash_from_digest, hash_to_wire, BlockHeader, CompactTarget, ConfigError, H256};

/// Base units per coin.
pub const COIN: i64 = 100_000_000;

/// Compact target pushed at the start of every genesis coinbase script.
const GENESIS_SCRIPT_BITS: i64 = 486_604_799;
const GENESIS_SCRIPT_EXTRA_NONCE: i64 = 4;

const OP_PUSHDATA1: u8 = 0x4c;
const OP_PUSHDATA2: u8 = 0x4d;
const OP_PUSHDATA4: u8 = 0x4e;
const OP_CHECKSIG: u8 = 0xac;

/// Documented inputs of a genesis block.
#[derive(Debug, Clone)]
pub struct GenesisSpec {
    /// Newspaper headline embedded in the coinbase script.
    pub timestamp: &'static str,
    /// Uncompressed public key (hex) paid by the coinbase output.
    pub output_pubkey: &'static str,
    pub time: u32,
    pub nonce: u32,
    pub bits: CompactTarget,
    pub version: i32,
    pub reward: i64,
}

/// The single coinbase-shaped transaction of a genesis block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinbaseTx {
    pub version: i32,
    pub script_sig: Vec<u8>,
    pub value: i64,
    pub script_pubkey: Vec<u8>,
    pub lock_time: u32,
}

impl CoinbaseTx {
    /// Wire serialization: one null-prevout input, one output.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(64 + self.script_sig.len() + self.script_pubkey.len());
        bytes.extend_from_slice(&self.version.to_le_bytes());

        write_compact_size(&mut bytes, 1);
        bytes.extend_from_slice(&[0u8; 32]);
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        write_compact_size(&mut bytes, self.script_sig.len() as u64);
        bytes.extend_from_slice(&self.script_sig);
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());

        write_compact_size(&mut bytes, 1);
        bytes.extend_from_slice(&self.value.to_le_bytes());
        write_compact_size(&mut bytes, self.script_pubkey.len() as u64);
        bytes.extend_from_slice(&self.script_pubkey);

        bytes.extend_from_slice(&self.lock_time.to_le_bytes());
        bytes
    }

    pub fn txid(&self) -> H256 {
        hash_from_digest(sha256d(&self.serialize()))
    }
}

/// A fully built genesis block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisBlock {
    pub header: BlockHeader,
    pub coinbase: CoinbaseTx,
}

impl GenesisBlock {
    pub fn hash(&self) -> H256 {
        self.header.identity_hash()
    }

    pub fn merkle_root(&self) -> H256 {
        self.header.merkle_root
    }
}

impl GenesisSpec {
    /// Build the genesis block described by this spec.
    pub fn build(&self) -> Result<GenesisBlock, ConfigError> {
        let pubkey = hex::decode(self.output_pubkey)
            .map_err(|_| ConfigError::InvalidHash(self.output_pubkey.to_string()))?;

        let mut script_sig = Vec::with_capacity(8 + self.timestamp.len());
        push_data(&mut script_sig, &script_num(GENESIS_SCRIPT_BITS));
        push_data(&mut script_sig, &script_num(GENESIS_SCRIPT_EXTRA_NONCE));
        push_data(&mut script_sig, self.timestamp.as_bytes());

        let mut script_pubkey = Vec::with_capacity(pubkey.len() + 2);
        push_data(&mut script_pubkey, &pubkey);
        script_pubkey.push(OP_CHECKSIG);

        let coinbase = CoinbaseTx {
            version: 1,
            script_sig,
            value: self.reward,
            script_pubkey,
            lock_time: 0,
        };

        let header = BlockHeader {
            version: self.version,
            prev_hash: H256::zero(),
            merkle_root: merkle_root(&[coinbase.txid()]),
            time: self.time,
            bits: self.bits,
            nonce: self.nonce,
        };

        Ok(GenesisBlock { header, coinbase })
    }
}

/// Merkle root over transaction ids; an odd last entry pairs with itself.
pub fn merkle_root(txids: &[H256]) -> H256 {
    if txids.is_empty() {
        return H256::zero();
    }

    let mut level: Vec<[u8; 32]> = txids.iter().map(hash_to_wire).collect();

    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let right = pair.get(1).unwrap_or(&pair[0]);
                let mut joined = [0u8; 64];
                joined[..32].copy_from_slice(&pair[0]);
                joined[32..].copy_from_slice(right);
                sha256d(&joined)
            })
            .collect();
    }

    hash_from_digest(level[0])
}

// =============================================================================
// Script Helpers
// =============================================================================

/// Minimal little-endian script-number encoding with a sign bit.
fn script_num(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }

    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();
    let mut bytes = Vec::new();
    while magnitude > 0 {
        bytes.push((magnitude & 0xff) as u8);
        magnitude >>= 8;
    }

    let last = bytes.len() - 1;
    if bytes[last] & 0x80 != 0 {
        bytes.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        bytes[last] |= 0x80;
    }
    bytes
}

fn push_data(script: &mut Vec<u8>, data: &[u8]) {
    let len = data.len();
    if len < OP_PUSHDATA1 as usize {
        script.push(len as u8);
    } else if len <= 0xff {
        script.push(OP_PUSHDATA1);
        script.push(len as u8);
    } else if len <= 0xffff {
        script.push(OP_PUSHDATA2);
        script.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        script.push(OP_PUSHDATA4);
        script.extend_from_slice(&(len as u32).to_le_bytes());
    }
    script.extend_from_slice(data);
}

fn write_compact_size(bytes: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => bytes.push(n as u8),
        0xfd..=0xffff => {
            bytes.push(0xfd);
            bytes.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            bytes.push(0xfe);
            bytes.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            bytes.push(0xff);
            bytes.extend_from_slice(&n.to_le_bytes());
        }
    }
}
