//! # Checkpoint Tables
//!
//! Hard-pinned (height, hash) pairs plus the statistics recorded at the last
//! pin, used for sync-progress estimation.

use std::collections::BTreeMap;

use shared_types::H256;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Expected transaction throughput after the last checkpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TxRate {
    PerDay(f64),
    PerSecond(f64),
}

impl TxRate {
    pub fn per_second(self) -> f64 {
        match self {
            TxRate::PerDay(rate) => rate / SECONDS_PER_DAY,
            TxRate::PerSecond(rate) => rate,
        }
    }
}

/// Immutable checkpoint table for one network.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointSet {
    pins: BTreeMap<u32, H256>,
    /// Unix timestamp of the last pinned block.
    pub last_checkpoint_time: i64,
    /// Transactions between genesis and the last pinned block.
    pub last_checkpoint_tx: u64,
    pub tx_rate: TxRate,
}

impl CheckpointSet {
    pub fn new(
        pins: impl IntoIterator<Item = (u32, H256)>,
        last_checkpoint_time: i64,
        last_checkpoint_tx: u64,
        tx_rate: TxRate,
    ) -> Self {
        Self {
            pins: pins.into_iter().collect(),
            last_checkpoint_time,
            last_checkpoint_tx,
            tx_rate,
        }
    }

    /// Hash pinned at `height`, if any.
    pub fn get(&self, height: u32) -> Option<&H256> {
        self.pins.get(&height)
    }

    /// Highest pinned height.
    pub fn last_height(&self) -> Option<u32> {
        self.pins.keys().next_back().copied()
    }

    /// Pins from highest to lowest height.
    pub fn iter_descending(&self) -> impl Iterator<Item = (u32, &H256)> {
        self.pins.iter().rev().map(|(height, hash)| (*height, hash))
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}
