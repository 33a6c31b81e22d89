//! Domain layer: pure, immutable network data.

pub mod checkpoints;
pub mod genesis;
pub mod networks;
pub mod params;
pub mod profile;

pub use checkpoints::{CheckpointSet, TxRate};
pub use genesis::{merkle_root, CoinbaseTx, GenesisBlock, GenesisSpec, COIN};
pub use params::{
    ConsensusParams, Deployment, DeploymentPos, PrimitiveSwitch, RetargetSchedule, RuleRevision,
    BOOTSTRAP_MAX_ADJUST, BOOTSTRAP_RETARGET_HEIGHT, DEPLOYMENT_COUNT,
};
pub use profile::NetworkProfile;
