//! # Retargeting Scenarios
//!
//! Long synthetic chains on main-network parameters, with the required
//! target fed back into the validator.

#[cfg(test)]
mod tests {
    use pa_01_chain_params::{
        NetworkProfile, RetargetSchedule, RuleRevision, BOOTSTRAP_RETARGET_HEIGHT,
    };
    use pa_02_proof_of_work::{next_target, DifficultyEngine};
    use pa_04_header_validation::{HeaderValidator, RejectReason};
    use shared_types::{CompactTarget, Lane, NetworkId, H256, U256};

    use crate::fixtures::{init_logging, FixedHasher, ScenarioChain};

    const START: u32 = 1_420_000_000;
    const BITS: CompactTarget = CompactTarget(0x1d00_ffff);
    /// Global spacing that puts nine lane intervals inside the clamp.
    const SPACING: u32 = 33;

    /// Past the bootstrap height with every lane slightly ahead of schedule.
    fn steady_chain() -> ScenarioChain {
        let mut chain = ScenarioChain::new();
        let rounds = BOOTSTRAP_RETARGET_HEIGHT / 5 + 20;
        chain.push_rounds(rounds, START, SPACING, BITS);
        chain
    }

    /// Append `rounds` more rounds one second apart.
    fn compress(chain: &mut ScenarioChain, rounds: u32) {
        let start = chain.tip_time() + 1;
        chain.push_rounds(rounds, start, 1, BITS);
    }

    fn scaled(bits: CompactTarget, span: i64, window: i64) -> CompactTarget {
        CompactTarget::from_target(
            bits.to_target() * U256::from(span as u64) / U256::from(window as u64),
        )
    }

    #[test]
    fn test_steady_lanes_scale_by_measured_span() {
        init_logging();
        let profile = NetworkProfile::build(NetworkId::Main).unwrap();
        let params = &profile.params;
        let chain = steady_chain();
        let engine = DifficultyEngine::new(params);

        // The window spans nine same-lane intervals.
        let actual = 9 * 5 * i64::from(SPACING);
        let window = params.averaging_target_timespan();
        assert!(actual > window * (100 - params.max_adjust_up) / 100);
        assert!(actual < window * (100 + params.max_adjust_down) / 100);

        for lane in Lane::ALL {
            assert_eq!(
                engine.required_target(&chain.arena, chain.tip, lane),
                scaled(BITS, actual, window),
                "{lane}"
            );
        }
    }

    #[test]
    fn test_fast_lane_hardens_by_max_adjust_up() {
        let profile = NetworkProfile::build(NetworkId::Main).unwrap();
        let params = &profile.params;
        let mut chain = steady_chain();
        compress(&mut chain, 12);

        let window = params.averaging_target_timespan();
        let min_span = window * (100 - params.max_adjust_up) / 100;
        let engine = DifficultyEngine::new(params);

        assert_eq!(
            engine.required_target(&chain.arena, chain.tip, Lane::Slot2),
            scaled(BITS, min_span, window)
        );
    }

    #[test]
    fn test_legacy_schedule_swaps_clamp_and_uses_median_time() {
        let profile = NetworkProfile::build(NetworkId::Main).unwrap();
        let mut params = profile.params.clone();
        params.retarget_schedule = RetargetSchedule {
            legacy_before_height: Some(u32::MAX),
        };
        let mut chain = steady_chain();
        compress(&mut chain, 12);

        let window = params.averaging_target_timespan();
        let legacy_min = window * (100 - params.max_adjust_down) / 100;
        let current_min = window * (100 - params.max_adjust_up) / 100;

        assert_eq!(params.rule_revision(0), RuleRevision::Legacy);
        let legacy =
            DifficultyEngine::new(&params).required_target(&chain.arena, chain.tip, Lane::Slot2);
        assert_eq!(legacy, scaled(BITS, legacy_min, window));

        let current =
            next_target(&chain.arena, chain.tip, Lane::Slot2, &params, RuleRevision::Current);
        assert_eq!(current, scaled(BITS, current_min, window));
        assert_ne!(legacy, current);
    }

    #[test]
    fn test_targets_never_exceed_lane_limits() {
        let profile = NetworkProfile::build(NetworkId::Main).unwrap();
        let params = &profile.params;
        let mut chain = ScenarioChain::new();
        // Start at the limits and stall for a day between rounds.
        for round in 0..(BOOTSTRAP_RETARGET_HEIGHT / 5 + 15) {
            for lane in Lane::ALL {
                let time = START + round * 86_400 + lane.index() as u32;
                chain.push_synthetic(lane, time, params.pow_limit_compact(lane));
            }
        }

        for lane in Lane::ALL {
            for revision in [RuleRevision::Current, RuleRevision::Legacy] {
                let bits = next_target(&chain.arena, chain.tip, lane, params, revision);
                assert!(bits.to_target() <= params.pow_limit(lane), "{lane} {revision:?}");
            }
        }
    }

    #[test]
    fn test_validator_enforces_required_target() {
        init_logging();
        let profile = NetworkProfile::build(NetworkId::Main).unwrap();
        let mut chain = steady_chain();
        compress(&mut chain, 12);
        let validator = HeaderValidator::new(&profile, FixedHasher(H256::zero()), true);
        let engine = DifficultyEngine::new(&profile.params);
        let lane = Lane::Slot4;

        let required = engine.required_target(&chain.arena, chain.tip, lane);
        let header = chain.child_header(lane, required);
        assert!(validator.validate(&chain.arena, chain.tip, &header).is_accepted());

        let stale = chain.child_header(lane, BITS);
        assert_eq!(
            validator.validate(&chain.arena, chain.tip, &stale).reject_reason(),
            Some(&RejectReason::BadDifficulty {
                lane,
                expected: required,
                got: BITS,
            })
        );

        // Main never accepts a block at the lane limit instead.
        let easy = chain.child_header(lane, profile.params.pow_limit_compact(lane));
        assert!(!validator.validate(&chain.arena, chain.tip, &easy).is_accepted());
    }

    #[test]
    fn test_testnet_rejects_lane_limit_bits() {
        let profile = NetworkProfile::build(NetworkId::Test).unwrap();
        assert!(profile.params.pow_allow_min_difficulty_blocks);
        let chain = steady_chain();
        let validator = HeaderValidator::new(&profile, FixedHasher(H256::zero()), true);
        let lane = Lane::Slot1;

        let required =
            DifficultyEngine::new(&profile.params).required_target(&chain.arena, chain.tip, lane);
        let limit = profile.params.pow_limit_compact(lane);
        assert_ne!(required, limit);

        // The flag is carried but grants no exception.
        let easy = chain.child_header(lane, limit);
        assert_eq!(
            validator.validate(&chain.arena, chain.tip, &easy).reject_reason(),
            Some(&RejectReason::BadDifficulty {
                lane,
                expected: required,
                got: limit,
            })
        );

        let header = chain.child_header(lane, required);
        assert!(validator.validate(&chain.arena, chain.tip, &header).is_accepted());

        let wrong = chain.child_header(lane, CompactTarget(0x1c00_ffff));
        assert!(matches!(
            validator.validate(&chain.arena, chain.tip, &wrong).reject_reason(),
            Some(RejectReason::BadDifficulty { .. })
        ));
    }

    #[test]
    fn test_young_lane_mines_at_limit() {
        let profile = NetworkProfile::build(NetworkId::Main).unwrap();
        let params = &profile.params;
        let mut chain = ScenarioChain::new();
        // Lane 5 has fewer blocks than the averaging interval.
        for i in 0..40u32 {
            let lane = if i % 8 == 0 { Lane::Slot5 } else { Lane::Slot1 };
            chain.push_synthetic(lane, START + i * 30, BITS);
        }

        let engine = DifficultyEngine::new(params);
        assert_eq!(
            engine.required_target(&chain.arena, chain.tip, Lane::Slot5),
            params.pow_limit_compact(Lane::Slot5)
        );
    }
}
