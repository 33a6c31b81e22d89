//! # Genesis Scenarios
//!
//! Every shipped profile rebuilds its genesis block, pins it at height 0 and
//! accepts it through the full pipeline.

#[cfg(test)]
mod tests {
    use pa_01_chain_params::{networks, NetworkProfile};
    use pa_04_header_validation::{HeaderValidator, HeaderVerdict};
    use shared_types::{hash_from_hex, BlockIndexArena, Lane, NetworkId, H256};

    use crate::fixtures::{init_logging, FixedHasher};

    const NETWORKS: [NetworkId; 3] = [NetworkId::Main, NetworkId::Test, NetworkId::Regtest];

    #[test]
    fn test_main_genesis_reproduces_documented_hashes() {
        init_logging();
        let profile = NetworkProfile::build(NetworkId::Main).unwrap();

        assert_eq!(
            profile.genesis_hash(),
            hash_from_hex(networks::MAIN_GENESIS_HASH).unwrap()
        );
        assert_eq!(
            profile.genesis.merkle_root(),
            hash_from_hex(networks::GENESIS_MERKLE_ROOT).unwrap()
        );
        assert_eq!(profile.genesis.header.merkle_root, profile.genesis.merkle_root());
    }

    #[test]
    fn test_networks_share_coinbase_but_not_genesis() {
        let profiles: Vec<_> = NETWORKS
            .iter()
            .map(|id| NetworkProfile::build(*id).unwrap())
            .collect();

        for pair in profiles.windows(2) {
            assert_eq!(pair[0].genesis.merkle_root(), pair[1].genesis.merkle_root());
            assert_ne!(pair[0].genesis_hash(), pair[1].genesis_hash());
            assert_ne!(pair[0].magic, pair[1].magic);
        }
    }

    #[test]
    fn test_genesis_is_checkpoint_zero() {
        for id in NETWORKS {
            let profile = NetworkProfile::build(id).unwrap();
            assert_eq!(profile.checkpoints.get(0), Some(&profile.genesis_hash()), "{id}");
            assert_eq!(profile.params.genesis_hash, profile.genesis_hash(), "{id}");
        }
    }

    #[test]
    fn test_genesis_passes_pipeline() {
        init_logging();
        for id in NETWORKS {
            let profile = NetworkProfile::build(id).unwrap();
            let validator = HeaderValidator::new(&profile, FixedHasher(H256::zero()), true);
            let arena = BlockIndexArena::new();

            assert_eq!(
                validator.validate(&arena, None, &profile.genesis.header),
                HeaderVerdict::Accepted {
                    lane: Lane::Slot1,
                    height: 0
                },
                "{id}"
            );
        }
    }

    #[test]
    fn test_genesis_bits_are_lane_one_limit() {
        for id in NETWORKS {
            let profile = NetworkProfile::build(id).unwrap();
            assert_eq!(
                profile.genesis.header.bits,
                profile.params.pow_limit_compact(Lane::Slot1),
                "{id}"
            );
        }
    }
}
