//! Network Tables
//!
//! Compiled-in constants for main, test and regtest. Each network is a
//! complete, flat value; nothing is inherited at runtime.

use shared_types::{hash_from_hex, CompactTarget, ConfigError, H256, U256};

use super::checkpoints::{CheckpointSet, TxRate};
use super::genesis::{GenesisSpec, COIN};
use super::params::{ConsensusParams, Deployment, RetargetSchedule, DEPLOYMENT_COUNT};

// =============================================================================
// Genesis
// =============================================================================

const GENESIS_TIMESTAMP: &str =
    "Nasa\u{2019}s NuSTAR probe takes first spectacular, Christmassy picture of the sun";

const GENESIS_OUTPUT_PUBKEY: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61de\
                                     b649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";

pub const GENESIS_MERKLE_ROOT: &str =
    "7e86d7e6d123ba67684125d094d010a6e04ab753fd5d601c024c155c0a4eb51e";
pub const MAIN_GENESIS_HASH: &str =
    "d8a2b2439d013a59f3bfc626a33487a3d7d27e42a3c9e0b81af814cd8e592f31";
pub const TEST_GENESIS_HASH: &str =
    "79b11e9472e5876fa6b6fac3efd46d63ee19e6f700d9048364e0b4ddeab0b58b";
pub const REGTEST_GENESIS_HASH: &str =
    "2273ea4189b9aedb13f7051f0c42049bcb8d2549410a34d5d5d9eb1511c43268";

const TEST_GENESIS_TIME: u32 = 1_419_370_259;

pub fn main_genesis_spec() -> GenesisSpec {
    GenesisSpec {
        timestamp: GENESIS_TIMESTAMP,
        output_pubkey: GENESIS_OUTPUT_PUBKEY,
        time: 1_419_368_971,
        nonce: 7_659_762,
        bits: CompactTarget(0x1e0f_ffff),
        version: 1,
        reward: 100 * COIN,
    }
}

pub fn test_genesis_spec() -> GenesisSpec {
    GenesisSpec {
        time: TEST_GENESIS_TIME,
        nonce: 1_875_768,
        ..main_genesis_spec()
    }
}

pub fn regtest_genesis_spec() -> GenesisSpec {
    GenesisSpec {
        time: TEST_GENESIS_TIME,
        nonce: 2,
        bits: CompactTarget(0x207f_ffff),
        ..main_genesis_spec()
    }
}

// =============================================================================
// Consensus Parameters
// =============================================================================

const MAIN_POW_LIMIT_SHIFT: [usize; 5] = [20, 20, 20, 16, 20];
const REGTEST_POW_LIMIT_SHIFT: [usize; 5] = [1; 5];

/// Height at which merge mining, BIP34/65/66 and the v2 work rules activated.
const MAIN_FORK_HEIGHT: u32 = 456_015;
const MAIN_BIP34_HASH: &str = "07e873fa202ee09798b96d1e070153eb3f6753ca958532ed7d46e13e0625edbb";
const MAIN_ASSUME_VALID: &str = "8e0421cf747f0c711ca5f86fb9ef28ad6decd8ecafd4c8182f332f9365279707";

fn pow_limits(shifts: [usize; 5]) -> [U256; 5] {
    shifts.map(|shift| U256::MAX >> shift)
}

fn main_deployments() -> [Deployment; DEPLOYMENT_COUNT] {
    [
        Deployment {
            bit: 28,
            start_time: 1_199_145_601,
            timeout: 1_230_767_999,
        },
        Deployment {
            bit: 0,
            start_time: 1_485_907_200,
            timeout: 1_517_443_200,
        },
        Deployment {
            bit: 1,
            start_time: 1_485_907_200,
            timeout: 1_517_443_200,
        },
    ]
}

pub fn main_params() -> Result<ConsensusParams, ConfigError> {
    Ok(ConsensusParams {
        genesis_hash: hash_from_hex(MAIN_GENESIS_HASH)?,
        subsidy_halving_interval: 210_000,
        bip34_height: MAIN_FORK_HEIGHT,
        bip34_hash: hash_from_hex(MAIN_BIP34_HASH)?,
        bip65_height: MAIN_FORK_HEIGHT,
        bip66_height: MAIN_FORK_HEIGHT,
        rule_change_activation_threshold: 7_560,
        miner_confirmation_window: 10_080,
        deployments: main_deployments(),
        pow_limits: pow_limits(MAIN_POW_LIMIT_SHIFT),
        pow_allow_min_difficulty_blocks: false,
        pow_no_retargeting: false,
        pow_target_spacing: 30,
        pow_target_timespan: 1_500,
        pow_averaging_interval: 10,
        max_adjust_down: 4,
        max_adjust_up: 2,
        retarget_schedule: RetargetSchedule::default(),
        minimum_chain_work: U256::zero(),
        default_assume_valid: hash_from_hex(MAIN_ASSUME_VALID)?,
        auxpow_chain_id: 20,
        strict_chain_id: true,
        start_auxpow_height: MAIN_FORK_HEIGHT,
        legacy_blocks_before: Some(MAIN_FORK_HEIGHT),
        time_lyra2re2_start: 1_480_204_800,
        time_argon2d_start: 1_508_457_600,
        sequential_lane_rule_v1_height: 450_014,
        sequential_lane_rule_v2_height: 466_070,
        sequential_lane_max_v1: 6,
        sequential_lane_max_v2: 3,
    })
}

pub fn test_params() -> Result<ConsensusParams, ConfigError> {
    Ok(ConsensusParams {
        genesis_hash: hash_from_hex(TEST_GENESIS_HASH)?,
        pow_allow_min_difficulty_blocks: true,
        default_assume_valid: H256::zero(),
        legacy_blocks_before: None,
        ..main_params()?
    })
}

pub fn regtest_params() -> Result<ConsensusParams, ConfigError> {
    let deployments = main_deployments().map(|deployment| Deployment {
        start_time: 0,
        timeout: 999_999_999_999,
        ..deployment
    });

    Ok(ConsensusParams {
        genesis_hash: hash_from_hex(REGTEST_GENESIS_HASH)?,
        subsidy_halving_interval: 150,
        bip34_height: 100_000_000,
        bip34_hash: H256::zero(),
        bip65_height: 100_000_000,
        bip66_height: 100_000_000,
        rule_change_activation_threshold: 108,
        miner_confirmation_window: 144,
        deployments,
        pow_limits: pow_limits(REGTEST_POW_LIMIT_SHIFT),
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: true,
        default_assume_valid: H256::zero(),
        strict_chain_id: false,
        legacy_blocks_before: None,
        time_lyra2re2_start: 0,
        time_argon2d_start: 0,
        ..main_params()?
    })
}

// =============================================================================
// Checkpoints
// =============================================================================

const MAIN_CHECKPOINTS: [(u32, &str); 12] = [
    (0, MAIN_GENESIS_HASH),
    (15_005, "240c146f076b5c3dc7573a3016cf7349c52a4cda4cad9ea2c67bf23bd9543e68"),
    (162_799, "e1e1f56dc314c99f156d06e37cca0f9f5d594affe867f2a38728986ade66562f"),
    (426_229, "92431424fb06129bafe00ff2e4fa65f071c28067eb42d0ce523f4850d5c58ac8"),
    (450_014, "b6236b74c586bf00d2a115ef8df215b4e3399a0be9b46385082cc985677874b9"),
    (451_899, "d971c1fca5c3ae08e318e4844e6465d96c93a37187c1e1e25b2a706fde00cdd6"),
    (456_015, MAIN_BIP34_HASH),
    (456_402, "9da02fb278c8385d500c169eb37ba8c4368c6f002cd769e4ebba7bb27e90338f"),
    (466_070, "3da12fb3a17eaa3680e122d6f5b852fdcdc2c13748985d070a4312bc04faed6c"),
    (494_719, "a6405ca38116e868e1ec5110bbbf0633d3b53d17bf208cb310980152434e1d8e"),
    (528_660, "8fb47753ef6c513dce414187d75635365395571e4881b516172ca24f215a7c44"),
    (563_725, MAIN_ASSUME_VALID),
];

fn parse_pins(pins: &[(u32, &str)]) -> Result<Vec<(u32, H256)>, ConfigError> {
    pins.iter()
        .map(|(height, hash)| Ok((*height, hash_from_hex(hash)?)))
        .collect()
}

pub fn main_checkpoints() -> Result<CheckpointSet, ConfigError> {
    Ok(CheckpointSet::new(
        parse_pins(&MAIN_CHECKPOINTS)?,
        1_463_924_536,
        686_126,
        TxRate::PerDay(1_000.0),
    ))
}

pub fn test_checkpoints() -> Result<CheckpointSet, ConfigError> {
    Ok(CheckpointSet::new(
        parse_pins(&[(0, TEST_GENESIS_HASH)])?,
        i64::from(TEST_GENESIS_TIME),
        1,
        TxRate::PerDay(50.0),
    ))
}

pub fn regtest_checkpoints() -> Result<CheckpointSet, ConfigError> {
    Ok(CheckpointSet::new(
        parse_pins(&[(0, REGTEST_GENESIS_HASH)])?,
        0,
        0,
        TxRate::PerDay(0.0),
    ))
}
