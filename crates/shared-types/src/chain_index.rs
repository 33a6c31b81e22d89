//! # Chain Index Port
//!
//! Read-only view of the externally owned block-index graph.
//!
//! Nodes are addressed by dense [`BlockId`] indices and link to their parent
//! by index, never by reference. The validation core only ever walks these
//! links backwards; it never mutates a node.
//!
//! [`BlockIndexArena`] is an in-memory implementation for embedders and tests.
//! A storage engine that persists the graph implements [`ChainIndex`] itself.

use std::collections::HashMap;

use crate::compact::{block_proof, CompactTarget};
use crate::entities::{Lane, H256, U256};

/// Number of ancestors (including the node itself) in the median-time window.
pub const MEDIAN_TIME_SPAN: usize = 11;

/// Dense index of a node in the chain-index graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// One node of the chain-index graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockIndexEntry {
    /// Block identity hash.
    pub hash: H256,
    pub height: u32,
    /// Header timestamp (Unix seconds).
    pub time: u32,
    /// Claimed target.
    pub bits: CompactTarget,
    /// Raw header version.
    pub version: i32,
    /// Lane the header was classified into when stored.
    pub lane: Lane,
    /// Transactions from genesis up to and including this block.
    pub chain_tx: u64,
    /// Work from genesis up to and including this block.
    pub chain_work: U256,
    /// Parent node, `None` for genesis.
    pub prev: Option<BlockId>,
}

impl BlockIndexEntry {
    pub fn block_time(&self) -> i64 {
        i64::from(self.time)
    }
}

/// Capabilities the external store must expose.
///
/// Only [`ChainIndex::entry`] is required; the walks have default
/// implementations in terms of it.
pub trait ChainIndex {
    /// Look up a node. `None` for ids the store does not know.
    fn entry(&self, id: BlockId) -> Option<&BlockIndexEntry>;

    /// Parent of `id`.
    fn prev(&self, id: BlockId) -> Option<BlockId> {
        self.entry(id).and_then(|entry| entry.prev)
    }

    /// Ancestor of `id` at `height`, walking parent links.
    fn ancestor(&self, id: BlockId, height: u32) -> Option<BlockId> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let entry = self.entry(current)?;
            if entry.height == height {
                return Some(current);
            }
            if entry.height < height {
                return None;
            }
            cursor = entry.prev;
        }
        None
    }

    /// Nearest node at or before `from` that was mined under `lane`.
    fn last_for_lane(&self, from: Option<BlockId>, lane: Lane) -> Option<BlockId> {
        let mut cursor = from;
        while let Some(current) = cursor {
            let entry = self.entry(current)?;
            if entry.lane == lane {
                return Some(current);
            }
            cursor = entry.prev;
        }
        None
    }

    /// Median of the last [`MEDIAN_TIME_SPAN`] block times ending at `id`.
    fn median_time_past(&self, id: BlockId) -> i64 {
        let mut times = Vec::with_capacity(MEDIAN_TIME_SPAN);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if times.len() == MEDIAN_TIME_SPAN {
                break;
            }
            let Some(entry) = self.entry(current) else {
                break;
            };
            times.push(entry.block_time());
            cursor = entry.prev;
        }
        if times.is_empty() {
            return 0;
        }
        times.sort_unstable();
        times[times.len() / 2]
    }
}

/// Fields a caller supplies when appending a block to the arena.
#[derive(Debug, Clone)]
pub struct NewBlock {
    pub hash: H256,
    pub time: u32,
    pub bits: CompactTarget,
    pub version: i32,
    pub lane: Lane,
    /// Transactions in this block alone.
    pub tx_count: u64,
}

/// Height-ordered arena of chain-index nodes.
#[derive(Debug, Default, Clone)]
pub struct BlockIndexArena {
    nodes: Vec<BlockIndexEntry>,
    by_hash: HashMap<H256, BlockId>,
}

impl BlockIndexArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block on top of `prev` and return its id.
    ///
    /// Height, cumulative transaction count and cumulative work are derived
    /// from the parent. An unknown `prev` is treated as no parent.
    pub fn push(&mut self, prev: Option<BlockId>, block: NewBlock) -> BlockId {
        let parent = prev.and_then(|id| self.entry(id));
        let (height, chain_tx, chain_work) = match parent {
            Some(p) => (p.height + 1, p.chain_tx, p.chain_work),
            None => (0, 0, U256::zero()),
        };
        let prev = parent.and(prev);

        let id = BlockId(self.nodes.len() as u32);
        self.nodes.push(BlockIndexEntry {
            hash: block.hash,
            height,
            time: block.time,
            bits: block.bits,
            version: block.version,
            lane: block.lane,
            chain_tx: chain_tx + block.tx_count,
            chain_work: chain_work.saturating_add(block_proof(block.bits)),
            prev,
        });
        self.by_hash.insert(block.hash, id);
        id
    }

    /// Node id for a block hash.
    pub fn lookup(&self, hash: &H256) -> Option<BlockId> {
        self.by_hash.get(hash).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ChainIndex for BlockIndexArena {
    fn entry(&self, id: BlockId) -> Option<&BlockIndexEntry> {
        self.nodes.get(id.0 as usize)
    }
}
