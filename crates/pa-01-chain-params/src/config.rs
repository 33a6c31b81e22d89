//! Core configuration from environment variables.

use std::env;

use serde::Deserialize;
use shared_types::{ConfigError, NetworkId};

use crate::domain::{DeploymentPos, NetworkProfile};
use crate::registry;

/// A regtest activation-window override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ActivationOverride {
    pub deployment: DeploymentPos,
    pub start_time: i64,
    pub timeout: i64,
}

impl std::str::FromStr for ActivationOverride {
    type Err = ConfigError;

    /// Parse `deployment:start:timeout`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let [name, start, timeout] = parts.as_slice() else {
            return Err(ConfigError::InvalidParams(format!(
                "activation override '{s}' is not deployment:start:timeout"
            )));
        };

        let parse_time = |value: &str| {
            value.parse::<i64>().map_err(|_| {
                ConfigError::InvalidParams(format!("invalid time '{value}' in override '{s}'"))
            })
        };

        Ok(Self {
            deployment: name.parse()?,
            start_time: parse_time(*start)?,
            timeout: parse_time(*timeout)?,
        })
    }
}

/// Settings for the consensus core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Network to run on.
    pub network: NetworkId,

    /// Whether checkpoint pins are enforced.
    pub checkpoints_enabled: bool,

    /// Activation-window overrides; honoured on regtest only.
    pub regtest_deployments: Vec<ActivationOverride>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            network: NetworkId::Main,
            checkpoints_enabled: true,
            regtest_deployments: Vec::new(),
        }
    }
}

impl CoreConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PA_NETWORK`: main, test or regtest (default: main)
    /// - `PA_CHECKPOINTS`: enforce checkpoints (default: true)
    /// - `PA_VBPARAMS`: comma-separated `deployment:start:timeout` overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let network = match env::var("PA_NETWORK") {
            Ok(value) => value.parse()?,
            Err(_) => NetworkId::Main,
        };

        let checkpoints_enabled = env::var("PA_CHECKPOINTS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        let regtest_deployments = match env::var("PA_VBPARAMS") {
            Ok(value) => value
                .split(',')
                .filter(|entry| !entry.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<ActivationOverride>, ConfigError>>()?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            network,
            checkpoints_enabled,
            regtest_deployments,
        })
    }

    /// Build the configured profile and apply any activation overrides.
    pub fn build_profile(&self) -> Result<NetworkProfile, ConfigError> {
        let mut profile = NetworkProfile::build(self.network)?;
        for entry in &self.regtest_deployments {
            profile.override_activation_window(entry.deployment, entry.start_time, entry.timeout)?;
        }
        Ok(profile)
    }

    /// Build the configured profile and install it as the active one.
    pub fn activate(&self) -> Result<&'static NetworkProfile, ConfigError> {
        registry::install_profile(self.build_profile()?)
    }
}
