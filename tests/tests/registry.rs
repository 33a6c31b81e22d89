//! Process-wide profile selection.
//!
//! Runs in its own binary: the active profile can be chosen only once per
//! process.

use pa_01_chain_params::{current_profile, select_network, try_current_profile, CoreConfig};
use shared_types::{ConfigError, NetworkId};

#[test]
fn test_profile_selected_once_per_process() {
    assert!(try_current_profile().is_none());

    let config = CoreConfig {
        network: NetworkId::Regtest,
        checkpoints_enabled: true,
        regtest_deployments: vec!["csv:10:20".parse().unwrap()],
    };
    let active = config.activate().unwrap();
    assert_eq!(active.id, NetworkId::Regtest);
    assert_eq!(current_profile().id, NetworkId::Regtest);

    // Re-activating the identical configuration is harmless.
    assert!(config.activate().is_ok());

    // A different network, or the same network with other overrides, is not.
    assert!(matches!(
        select_network(NetworkId::Main),
        Err(ConfigError::AlreadySelected { .. })
    ));
    let other = CoreConfig {
        regtest_deployments: Vec::new(),
        ..config
    };
    assert!(matches!(
        other.activate(),
        Err(ConfigError::AlreadySelected { .. })
    ));
    assert!(std::ptr::eq(current_profile(), active));
}
