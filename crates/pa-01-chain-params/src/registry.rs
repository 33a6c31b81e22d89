//! # Active Profile Registry
//!
//! A process-wide handle to the selected [`NetworkProfile`].
//!
//! Validation code should take a `&NetworkProfile` explicitly. The handle
//! exists for embedders that need one shared value: it is initialised exactly
//! once, before validation starts, and never reassigned.

use once_cell::sync::OnceCell;
use shared_types::{ConfigError, NetworkId};
use tracing::info;

use crate::domain::NetworkProfile;

static ACTIVE: OnceCell<NetworkProfile> = OnceCell::new();

/// Build, validate and activate the profile for `id`.
///
/// Selecting the already-active network again returns the active profile.
/// Selecting a different one fails with [`ConfigError::AlreadySelected`].
pub fn select_network(id: NetworkId) -> Result<&'static NetworkProfile, ConfigError> {
    let active = ACTIVE.get_or_try_init(|| {
        let profile = NetworkProfile::build(id)?;
        info!(network = %id, "Network selected");
        Ok::<_, ConfigError>(profile)
    })?;

    if active.id != id {
        return Err(already_selected(active, id));
    }
    Ok(active)
}

/// Activate a profile the caller built, e.g. regtest with moved activation
/// windows. Fails if a different profile is already active.
pub fn install_profile(profile: NetworkProfile) -> Result<&'static NetworkProfile, ConfigError> {
    let id = profile.id;
    match ACTIVE.try_insert(profile) {
        Ok(active) => {
            info!(network = %id, "Network profile installed");
            Ok(active)
        }
        Err((active, rejected)) if *active == rejected => Ok(active),
        Err((active, _)) => Err(already_selected(active, id)),
    }
}

/// The active profile.
///
/// # Panics
///
/// Panics if no profile has been selected. Reading configuration before
/// selecting a network is a programming error.
pub fn current_profile() -> &'static NetworkProfile {
    match ACTIVE.get() {
        Some(profile) => profile,
        None => panic!("current_profile() called before select_network()"),
    }
}

/// The active profile, if one has been selected.
pub fn try_current_profile() -> Option<&'static NetworkProfile> {
    ACTIVE.get()
}

fn already_selected(active: &NetworkProfile, requested: NetworkId) -> ConfigError {
    ConfigError::AlreadySelected {
        active: active.id.to_string(),
        requested: requested.to_string(),
    }
}
