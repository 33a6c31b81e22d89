//! # Network Profile
//!
//! Everything a node needs to know about the network it runs on: consensus
//! parameters, the genesis block, the checkpoint table and the informational
//! wire constants.
//!
//! Construction is self-validating. The genesis block is rebuilt from its
//! documented inputs and must reproduce the compiled-in hash and merkle root
//! exactly, otherwise construction fails with a fatal [`ConfigError`].

use shared_types::{hash_from_hex, ConfigError, H256, NetworkId};
use tracing::{error, info};

use super::checkpoints::CheckpointSet;
use super::genesis::{GenesisBlock, GenesisSpec};
use super::networks;
use super::params::{ConsensusParams, DeploymentPos};

/// A fully built, validated network profile.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkProfile {
    pub id: NetworkId,
    pub params: ConsensusParams,
    pub genesis: GenesisBlock,
    pub checkpoints: CheckpointSet,
    /// Message-start bytes framing every P2P message.
    pub magic: [u8; 4],
    pub default_port: u16,
    /// Sub-directory of the data directory, `None` for main.
    pub data_dir: Option<&'static str>,
}

struct NetworkTable {
    params: ConsensusParams,
    genesis: GenesisSpec,
    checkpoints: CheckpointSet,
    expected_hash: &'static str,
    magic: [u8; 4],
    default_port: u16,
    data_dir: Option<&'static str>,
}

fn network_table(id: NetworkId) -> Result<NetworkTable, ConfigError> {
    Ok(match id {
        NetworkId::Main => NetworkTable {
            params: networks::main_params()?,
            genesis: networks::main_genesis_spec(),
            checkpoints: networks::main_checkpoints()?,
            expected_hash: networks::MAIN_GENESIS_HASH,
            magic: [0xc5, 0xab, 0xc6, 0x9d],
            default_port: 50_603,
            data_dir: None,
        },
        NetworkId::Test => NetworkTable {
            params: networks::test_params()?,
            genesis: networks::test_genesis_spec(),
            checkpoints: networks::test_checkpoints()?,
            expected_hash: networks::TEST_GENESIS_HASH,
            magic: [0xc6, 0xab, 0xc7, 0x9d],
            default_port: 60_603,
            data_dir: Some("testnet"),
        },
        NetworkId::Regtest => NetworkTable {
            params: networks::regtest_params()?,
            genesis: networks::regtest_genesis_spec(),
            checkpoints: networks::regtest_checkpoints()?,
            expected_hash: networks::REGTEST_GENESIS_HASH,
            magic: [0xc7, 0xab, 0xc8, 0x9d],
            default_port: 18_444,
            data_dir: Some("regtest"),
        },
    })
}

impl NetworkProfile {
    /// Build and self-validate the profile for `id`.
    pub fn build(id: NetworkId) -> Result<Self, ConfigError> {
        let table = network_table(id)?;
        table.params.validate()?;

        let genesis = table.genesis.build()?;
        verify_genesis(
            id,
            &genesis,
            hash_from_hex(table.expected_hash)?,
            hash_from_hex(networks::GENESIS_MERKLE_ROOT)?,
        )?;

        if table.params.genesis_hash != genesis.hash() {
            return Err(mismatch_error(id, table.params.genesis_hash, genesis.hash()));
        }

        info!(
            network = %id,
            genesis = %genesis.hash(),
            checkpoints = table.checkpoints.len(),
            "Network profile built"
        );

        Ok(Self {
            id,
            params: table.params,
            genesis,
            checkpoints: table.checkpoints,
            magic: table.magic,
            default_port: table.default_port,
            data_dir: table.data_dir,
        })
    }

    /// Parse a network name and build its profile.
    pub fn build_named(name: &str) -> Result<Self, ConfigError> {
        Self::build(name.parse()?)
    }

    pub fn genesis_hash(&self) -> H256 {
        self.genesis.hash()
    }

    /// Move a soft-fork activation window. Regtest only.
    pub fn override_activation_window(
        &mut self,
        pos: DeploymentPos,
        start_time: i64,
        timeout: i64,
    ) -> Result<(), ConfigError> {
        if self.id != NetworkId::Regtest {
            return Err(ConfigError::OverrideNotPermitted(self.id.to_string()));
        }

        let deployment = &mut self.params.deployments[pos.index()];
        deployment.start_time = start_time;
        deployment.timeout = timeout;

        info!(
            network = %self.id,
            deployment = %pos,
            start_time,
            timeout,
            "Activation window overridden"
        );
        Ok(())
    }
}

fn verify_genesis(
    id: NetworkId,
    genesis: &GenesisBlock,
    expected_hash: H256,
    expected_merkle: H256,
) -> Result<(), ConfigError> {
    if genesis.merkle_root() != expected_merkle {
        error!(
            network = %id,
            expected = %expected_merkle,
            computed = %genesis.merkle_root(),
            "Genesis merkle root mismatch"
        );
        return Err(ConfigError::GenesisMerkleMismatch {
            network: id.to_string(),
            expected: format!("{expected_merkle:x}"),
            computed: format!("{:x}", genesis.merkle_root()),
        });
    }

    if genesis.hash() != expected_hash {
        return Err(mismatch_error(id, expected_hash, genesis.hash()));
    }
    Ok(())
}

fn mismatch_error(id: NetworkId, expected: H256, computed: H256) -> ConfigError {
    error!(
        network = %id,
        expected = %expected,
        computed = %computed,
        "Genesis hash mismatch"
    );
    ConfigError::GenesisHashMismatch {
        network: id.to_string(),
        expected: format!("{expected:x}"),
        computed: format!("{computed:x}"),
    }
}
