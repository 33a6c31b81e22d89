//! Consensus Parameters
//!
//! One flat, immutable value per network. Test and regtest are not
//! specialisations of main; each network builds its own complete value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared_types::{CompactTarget, ConfigError, HashPrimitive, Lane, H256, LANE_COUNT, U256};

/// Number of version-bits deployments.
pub const DEPLOYMENT_COUNT: usize = 3;

/// Chain heights below this retarget with a ±20% window (Revision A only).
pub const BOOTSTRAP_RETARGET_HEIGHT: u32 = 1999;

/// Clamp percentage used during the bootstrap phase.
pub const BOOTSTRAP_MAX_ADJUST: i64 = 20;

/// Soft-fork deployments gated by activation windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentPos {
    TestDummy,
    Csv,
    Segwit,
}

impl DeploymentPos {
    pub const ALL: [DeploymentPos; DEPLOYMENT_COUNT] =
        [DeploymentPos::TestDummy, DeploymentPos::Csv, DeploymentPos::Segwit];

    pub fn index(self) -> usize {
        match self {
            DeploymentPos::TestDummy => 0,
            DeploymentPos::Csv => 1,
            DeploymentPos::Segwit => 2,
        }
    }
}

impl fmt::Display for DeploymentPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeploymentPos::TestDummy => "testdummy",
            DeploymentPos::Csv => "csv",
            DeploymentPos::Segwit => "segwit",
        };
        f.write_str(name)
    }
}

impl FromStr for DeploymentPos {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "testdummy" => Ok(DeploymentPos::TestDummy),
            "csv" => Ok(DeploymentPos::Csv),
            "segwit" => Ok(DeploymentPos::Segwit),
            _ => Err(ConfigError::UnknownDeployment(s.to_string())),
        }
    }
}

/// Activation window for one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Version bit signalling readiness.
    pub bit: u8,
    /// Median time past at which signalling may start.
    pub start_time: i64,
    /// Median time past after which the attempt expires.
    pub timeout: i64,
}

/// Retargeting rule revision.
///
/// Both bodies stay in the code base forever: blocks mined under the legacy
/// rule must keep validating at their original heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleRevision {
    /// Raw block times, time-warp repair, primitive-switch grace period and
    /// bootstrap leniency.
    Current,
    /// Median-time-past spans with the up/down clamp swapped; no repair,
    /// grace period or bootstrap leniency.
    Legacy,
}

/// Which revision applies at which height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RetargetSchedule {
    /// Blocks below this height retarget under [`RuleRevision::Legacy`].
    /// `None` means the current rule applies at every height.
    pub legacy_before_height: Option<u32>,
}

impl RetargetSchedule {
    pub fn revision_at(&self, height: u32) -> RuleRevision {
        match self.legacy_before_height {
            Some(limit) if height < limit => RuleRevision::Legacy,
            _ => RuleRevision::Current,
        }
    }
}

/// A permanent hash-primitive swap on one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveSwitch {
    pub lane: Lane,
    pub before: HashPrimitive,
    pub after: HashPrimitive,
    /// First header time (inclusive) using `after`.
    pub switch_time: u32,
    /// Whether retargeting falls back to the limit while the averaging
    /// window still straddles the switch.
    pub retarget_grace: bool,
}

impl PrimitiveSwitch {
    pub fn primitive_at(&self, time: u32) -> HashPrimitive {
        if time >= self.switch_time {
            self.after
        } else {
            self.before
        }
    }
}

/// Parameters that influence chain consensus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusParams {
    pub genesis_hash: H256,
    pub subsidy_halving_interval: u32,

    /// Soft-fork activation heights.
    pub bip34_height: u32,
    pub bip34_hash: H256,
    pub bip65_height: u32,
    pub bip66_height: u32,

    /// Version-bits signalling: blocks of `miner_confirmation_window` that
    /// must signal for a deployment to lock in.
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub deployments: [Deployment; DEPLOYMENT_COUNT],

    /// Easiest legal target per lane.
    pub pow_limits: [U256; LANE_COUNT],
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    /// Seconds per block across all lanes.
    pub pow_target_spacing: i64,
    pub pow_target_timespan: i64,
    /// Same-lane blocks per retarget window.
    pub pow_averaging_interval: i64,
    /// Percentages bounding a single retarget step.
    pub max_adjust_down: i64,
    pub max_adjust_up: i64,
    pub retarget_schedule: RetargetSchedule,

    pub minimum_chain_work: U256,
    pub default_assume_valid: H256,

    /// Merge mining.
    pub auxpow_chain_id: i32,
    pub strict_chain_id: bool,
    pub start_auxpow_height: u32,
    /// `None` tolerates legacy header versions at every height.
    pub legacy_blocks_before: Option<u32>,

    /// Permanent primitive switches: lane 1 Blake → Lyra2RE2,
    /// lane 3 Qubit → Argon2d.
    pub time_lyra2re2_start: u32,
    pub time_argon2d_start: u32,

    /// Consecutive same-lane block limits and the heights they apply from.
    pub sequential_lane_rule_v1_height: u32,
    pub sequential_lane_rule_v2_height: u32,
    pub sequential_lane_max_v1: u32,
    pub sequential_lane_max_v2: u32,
}

impl ConsensusParams {
    /// Target duration of one averaging window: every lane contributes
    /// `pow_averaging_interval` blocks at `pow_target_spacing` each.
    pub fn averaging_target_timespan(&self) -> i64 {
        self.pow_averaging_interval * self.pow_target_spacing * LANE_COUNT as i64
    }

    pub fn pow_limit(&self, lane: Lane) -> U256 {
        self.pow_limits[lane.index()]
    }

    pub fn pow_limit_compact(&self, lane: Lane) -> CompactTarget {
        CompactTarget::from_target(self.pow_limit(lane))
    }

    pub fn deployment(&self, pos: DeploymentPos) -> Deployment {
        self.deployments[pos.index()]
    }

    /// Whether a legacy header version is still tolerated at `height`.
    pub fn allow_legacy_blocks(&self, height: u32) -> bool {
        match self.legacy_blocks_before {
            None => true,
            Some(limit) => height < limit,
        }
    }

    /// The primitive swap configured for `lane`, if any.
    pub fn primitive_switch(&self, lane: Lane) -> Option<PrimitiveSwitch> {
        match lane {
            Lane::Slot1 => Some(PrimitiveSwitch {
                lane,
                before: HashPrimitive::Blake,
                after: HashPrimitive::Lyra2Re2,
                switch_time: self.time_lyra2re2_start,
                retarget_grace: false,
            }),
            Lane::Slot3 => Some(PrimitiveSwitch {
                lane,
                before: HashPrimitive::Qubit,
                after: HashPrimitive::Argon2d,
                switch_time: self.time_argon2d_start,
                retarget_grace: true,
            }),
            _ => None,
        }
    }

    /// Longest permitted run of consecutive same-lane blocks at `height`.
    pub fn sequential_lane_limit(&self, height: u32) -> Option<u32> {
        if height >= self.sequential_lane_rule_v2_height {
            Some(self.sequential_lane_max_v2)
        } else if height >= self.sequential_lane_rule_v1_height {
            Some(self.sequential_lane_max_v1)
        } else {
            None
        }
    }

    pub fn rule_revision(&self, height: u32) -> RuleRevision {
        self.retarget_schedule.revision_at(height)
    }

    /// Check the structural invariants every network must satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pow_target_spacing <= 0 {
            return Err(ConfigError::InvalidParams(
                "target spacing must be positive".into(),
            ));
        }
        if self.pow_averaging_interval <= 0 {
            return Err(ConfigError::InvalidParams(
                "averaging interval must be positive".into(),
            ));
        }
        if self.pow_target_timespan <= 0 {
            return Err(ConfigError::InvalidParams(
                "target timespan must be positive".into(),
            ));
        }
        if !(0..100).contains(&self.max_adjust_up) || !(0..100).contains(&self.max_adjust_down) {
            return Err(ConfigError::InvalidParams(
                "max adjust percentages must be in [0, 100)".into(),
            ));
        }
        if self.pow_limits.iter().any(|limit| limit.is_zero()) {
            return Err(ConfigError::InvalidParams(
                "proof-of-work limits must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
