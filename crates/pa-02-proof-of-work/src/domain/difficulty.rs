//! Per-Lane Difficulty Retargeting
//!
//! Every lane retargets independently: the required target for a block
//! depends only on the sub-chain of blocks mined under the same lane,
//! reached by walking parent links and skipping other lanes.
//!
//! **IMPORTANT**: a target is a CEILING. A HIGHER target is EASIER, a LOWER
//! target is HARDER. When blocks come too fast the target goes DOWN.
//!
//! Two rule revisions coexist and are never merged:
//!
//! | | Current | Legacy |
//! |---|---|---|
//! | span measured on | block times | median time past |
//! | out-of-order window start | repaired | kept |
//! | primitive-switch grace | yes | no |
//! | bootstrap ±20% clamp | below height 1999 | no |
//! | fast-block bound | `100 - max_adjust_up` | `100 - max_adjust_down` |
//! | slow-block bound | `100 + max_adjust_down` | `100 + max_adjust_up` |
//!
//! Degenerate inputs (no chain, too little same-lane history, missing
//! nodes) resolve to the lane's proof-of-work limit, never to an error.

use pa_01_chain_params::{
    ConsensusParams, RuleRevision, BOOTSTRAP_MAX_ADJUST, BOOTSTRAP_RETARGET_HEIGHT,
};
use shared_types::{BlockId, BlockIndexEntry, ChainIndex, CompactTarget, Lane, U256};
use tracing::debug;

/// Retarget calculator bound to one network's parameters.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyEngine<'a> {
    params: &'a ConsensusParams,
}

/// The averaging window located for a retarget.
struct Window<'i> {
    /// Newest same-lane block at or before the tip.
    prev: &'i BlockIndexEntry,
    prev_id: BlockId,
    /// Oldest same-lane block of the window.
    first: &'i BlockIndexEntry,
    first_id: BlockId,
}

impl<'a> DifficultyEngine<'a> {
    pub fn new(params: &'a ConsensusParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &'a ConsensusParams {
        self.params
    }

    fn limit_compact(&self, lane: Lane) -> CompactTarget {
        self.params.pow_limit_compact(lane)
    }

    /// Target required for the block following `tip`, under the revision the
    /// schedule assigns to that block's height.
    ///
    /// Networks without retargeting keep the lane's last target.
    pub fn required_target<I: ChainIndex + ?Sized>(
        &self,
        index: &I,
        tip: Option<BlockId>,
        lane: Lane,
    ) -> CompactTarget {
        if self.params.pow_no_retargeting {
            let last = index
                .last_for_lane(tip, lane)
                .and_then(|id| index.entry(id).map(|entry| (id, entry.block_time())));
            return match last {
                Some((id, time)) => self.calculate_next_work(index, id, time, lane),
                None => self.limit_compact(lane),
            };
        }

        let height = tip
            .and_then(|id| index.entry(id))
            .map_or(0, |entry| entry.height + 1);
        self.next_target(index, tip, lane, self.params.rule_revision(height))
    }

    /// Target required for the block following `tip` under `revision`.
    pub fn next_target<I: ChainIndex + ?Sized>(
        &self,
        index: &I,
        tip: Option<BlockId>,
        lane: Lane,
        revision: RuleRevision,
    ) -> CompactTarget {
        let Some(tip) = tip else {
            return self.limit_compact(lane);
        };
        match revision {
            RuleRevision::Current => self.next_target_current(index, tip, lane),
            RuleRevision::Legacy => self.next_target_legacy(index, tip, lane),
        }
    }

    /// Locate `pow_averaging_interval` same-lane blocks ending at or before
    /// `tip`. `None` when history runs out.
    fn locate_window<'i, I: ChainIndex + ?Sized>(
        &self,
        index: &'i I,
        tip: BlockId,
        lane: Lane,
    ) -> Option<Window<'i>> {
        let prev_id = index.last_for_lane(Some(tip), lane)?;
        let mut first_id = prev_id;
        for _ in 1..self.params.pow_averaging_interval {
            first_id = index.last_for_lane(index.prev(first_id), lane)?;
        }
        Some(Window {
            prev: index.entry(prev_id)?,
            prev_id,
            first: index.entry(first_id)?,
            first_id,
        })
    }

    /// Current rule.
    fn next_target_current<I: ChainIndex + ?Sized>(
        &self,
        index: &I,
        tip: BlockId,
        lane: Lane,
    ) -> CompactTarget {
        let limit = self.limit_compact(lane);
        let Some(tip_entry) = index.entry(tip) else {
            return limit;
        };
        let Some(Window {
            prev,
            mut first,
            mut first_id,
            ..
        }) = self.locate_window(index, tip, lane)
        else {
            debug!(%lane, height = tip_entry.height, "Insufficient same-lane history, using limit");
            return limit;
        };

        // Shift the window start back while the preceding same-lane block
        // claims a later time.
        loop {
            let Some(before_id) = index.last_for_lane(index.prev(first_id), lane) else {
                return limit;
            };
            let Some(before) = index.entry(before_id) else {
                return limit;
            };
            if before.time <= first.time {
                break;
            }
            debug!(
                %lane,
                earlier = before.time,
                later = first.time,
                "Window start out of order, shifting back"
            );
            first = before;
            first_id = before_id;
        }

        if let Some(switch) = self.params.primitive_switch(lane) {
            if switch.retarget_grace
                && tip_entry.time >= switch.switch_time
                && first.time < switch.switch_time
            {
                debug!(
                    %lane,
                    switch_time = switch.switch_time,
                    "Window straddles primitive switch, using limit"
                );
                return limit;
            }
        }

        let window = self.params.averaging_target_timespan();
        let (down, up) = if tip_entry.height < BOOTSTRAP_RETARGET_HEIGHT {
            (BOOTSTRAP_MAX_ADJUST, BOOTSTRAP_MAX_ADJUST)
        } else {
            (self.params.max_adjust_down, self.params.max_adjust_up)
        };
        let min_span = window * (100 - up) / 100;
        let max_span = window * (100 + down) / 100;

        let actual = prev.block_time() - first.block_time();
        self.retarget(lane, prev.bits, actual, min_span, max_span, window)
    }

    /// Legacy rule.
    fn next_target_legacy<I: ChainIndex + ?Sized>(
        &self,
        index: &I,
        tip: BlockId,
        lane: Lane,
    ) -> CompactTarget {
        let Some(window_blocks) = self.locate_window(index, tip, lane) else {
            debug!(%lane, "Insufficient same-lane history, using limit");
            return self.limit_compact(lane);
        };

        let window = self.params.averaging_target_timespan();
        let min_span = window * (100 - self.params.max_adjust_down) / 100;
        let max_span = window * (100 + self.params.max_adjust_up) / 100;

        let actual = index.median_time_past(window_blocks.prev_id)
            - index.median_time_past(window_blocks.first_id);
        self.retarget(lane, window_blocks.prev.bits, actual, min_span, max_span, window)
    }

    /// Single-window retarget against `pow_target_timespan`.
    ///
    /// With `pow_no_retargeting` set the tip's target is returned unchanged.
    pub fn calculate_next_work<I: ChainIndex + ?Sized>(
        &self,
        index: &I,
        tip: BlockId,
        first_block_time: i64,
        lane: Lane,
    ) -> CompactTarget {
        let Some(tip_entry) = index.entry(tip) else {
            return self.limit_compact(lane);
        };
        if self.params.pow_no_retargeting {
            return tip_entry.bits;
        }

        let timespan = self.params.pow_target_timespan;
        let actual = tip_entry.block_time() - first_block_time;
        self.retarget(
            lane,
            tip_entry.bits,
            actual,
            timespan / 4,
            timespan * 4,
            timespan,
        )
    }

    /// `old * clamp(actual) / span`, capped at the lane limit.
    ///
    /// The multiplication wraps at 256 bits like the consensus arithmetic it
    /// must reproduce.
    fn retarget(
        &self,
        lane: Lane,
        old_bits: CompactTarget,
        actual: i64,
        min_span: i64,
        max_span: i64,
        span: i64,
    ) -> CompactTarget {
        let clamped = actual.clamp(min_span, max_span);
        let limit = self.params.pow_limit(lane);

        let old = old_bits.to_target();
        let (scaled, _) = old.overflowing_mul(U256::from(clamped.max(0) as u64));
        let new = (scaled / U256::from(span.max(1) as u64)).min(limit);
        let new_bits = CompactTarget::from_target(new);

        debug!(
            %lane,
            actual,
            clamped,
            min_span,
            max_span,
            before = %old_bits,
            after = %new_bits,
            "Retarget"
        );
        new_bits
    }
}

/// Target required for the block following `tip` under `revision`.
pub fn next_target<I: ChainIndex + ?Sized>(
    index: &I,
    tip: Option<BlockId>,
    lane: Lane,
    params: &ConsensusParams,
    revision: RuleRevision,
) -> CompactTarget {
    DifficultyEngine::new(params).next_target(index, tip, lane, revision)
}

/// Single-window retarget, see [`DifficultyEngine::calculate_next_work`].
pub fn calculate_next_work<I: ChainIndex + ?Sized>(
    index: &I,
    tip: BlockId,
    first_block_time: i64,
    lane: Lane,
    params: &ConsensusParams,
) -> CompactTarget {
    DifficultyEngine::new(params).calculate_next_work(index, tip, first_block_time, lane)
}
