//! # Pipeline Scenarios
//!
//! A regtest chain grown header by header: every header is built on the
//! current tip, mined against the required target and then run through
//! [`HeaderValidator`](pa_04_header_validation::HeaderValidator) before it is
//! connected.

#[cfg(test)]
mod tests {
    use pa_01_chain_params::NetworkProfile;
    use pa_02_proof_of_work::{hash_primitive, DifficultyEngine, NativePowHasher};
    use pa_04_header_validation::{HeaderValidator, HeaderVerdict, RejectReason};
    use shared_types::{HashPrimitive, Lane, NetworkId, PowHashError, H256};

    use crate::fixtures::{grind, init_logging, FixedHasher, ScenarioChain, ScenarioHasher};

    fn regtest() -> NetworkProfile {
        NetworkProfile::build(NetworkId::Regtest).unwrap()
    }

    /// Connect the regtest genesis block.
    ///
    /// Genesis carries no mined nonce, so it is checked against the
    /// checkpoint pin with a hasher that always meets the target.
    fn bootstrap(profile: &NetworkProfile) -> ScenarioChain {
        let mut chain = ScenarioChain::new();
        let pinned = HeaderValidator::new(profile, FixedHasher(H256::zero()), true);
        let verdict = pinned.validate(&chain.arena, chain.tip, &profile.genesis.header);
        assert!(verdict.is_accepted(), "{verdict:?}");
        chain.connect(&profile.genesis.header);
        chain
    }

    #[test]
    fn test_mined_chain_over_every_lane() {
        init_logging();
        let profile = regtest();
        let hasher = ScenarioHasher::default();
        let validator = HeaderValidator::new(&profile, hasher, true);
        let engine = DifficultyEngine::new(&profile.params);
        let mut chain = bootstrap(&profile);

        let lanes = [
            Lane::Slot2,
            Lane::Slot4,
            Lane::Slot5,
            Lane::Slot1,
            Lane::Slot3,
            Lane::Slot2,
            Lane::Slot5,
        ];
        for (i, lane) in lanes.into_iter().enumerate() {
            let bits = engine.required_target(&chain.arena, chain.tip, lane);
            let mut header = chain.child_header(lane, bits);
            grind(&mut header, &profile.params, &hasher, true).unwrap();

            assert_eq!(
                validator.validate(&chain.arena, chain.tip, &header),
                HeaderVerdict::Accepted {
                    lane,
                    height: i as u32 + 1
                }
            );
            chain.connect(&header);
        }

        assert_eq!(validator.metrics().get_headers_accepted(), 7);
        assert_eq!(validator.metrics().get_headers_rejected(), 0);
    }

    #[test]
    fn test_argon2d_lane_with_native_backend() {
        init_logging();
        let profile = regtest();
        let validator = HeaderValidator::new(&profile, NativePowHasher::new(), true);
        let mut chain = bootstrap(&profile);
        let lane = Lane::Slot3;
        assert_eq!(
            hash_primitive(lane, chain.tip_time(), &profile.params),
            HashPrimitive::Argon2d
        );

        let bits = profile.params.pow_limit_compact(lane);
        let mut header = chain.child_header(lane, bits);
        grind(&mut header, &profile.params, &NativePowHasher::new(), true).unwrap();
        assert!(validator.validate(&chain.arena, chain.tip, &header).is_accepted());

        let mut unmined = header;
        grind(&mut unmined, &profile.params, &NativePowHasher::new(), false).unwrap();
        assert_eq!(
            validator.validate(&chain.arena, chain.tip, &unmined),
            HeaderVerdict::Rejected(RejectReason::HighHash { lane })
        );

        chain.connect(&header);
        assert_eq!(chain.arena.len(), 2);
    }

    #[test]
    fn test_native_backend_defers_other_lanes_to_embedder() {
        let profile = regtest();
        let validator = HeaderValidator::new(&profile, NativePowHasher::new(), true);
        let chain = bootstrap(&profile);
        let lane = Lane::Slot4;

        let header = chain.child_header(lane, profile.params.pow_limit_compact(lane));
        let verdict = validator.validate(&chain.arena, chain.tip, &header);
        let reason = verdict.reject_reason().unwrap();
        assert_eq!(
            *reason,
            RejectReason::HashUnavailable(PowHashError::Unsupported(HashPrimitive::Yescrypt))
        );
        assert!(!reason.is_permanent());
    }

    #[test]
    fn test_rejection_does_not_extend_chain() {
        let profile = regtest();
        let hasher = ScenarioHasher::default();
        let validator = HeaderValidator::new(&profile, hasher, true);
        let chain = bootstrap(&profile);

        let lane = Lane::Slot2;
        let mut orphan = chain.child_header(lane, profile.params.pow_limit_compact(lane));
        orphan.prev_hash = orphan.merkle_root;
        grind(&mut orphan, &profile.params, &hasher, true).unwrap();

        assert_eq!(
            validator.validate(&chain.arena, chain.tip, &orphan),
            HeaderVerdict::Rejected(RejectReason::UnknownParent)
        );
        assert_eq!(chain.arena.len(), 1);
        assert_eq!(validator.metrics().get_permanent_rejections(), 0);
        assert!(validator.metrics().get_rejection_rate() > 0.0);
    }
}
