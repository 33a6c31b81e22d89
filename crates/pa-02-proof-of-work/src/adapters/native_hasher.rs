//! Pure-Rust hasher backend.
//!
//! Argon2d is provided by the `argon2` crate. The remaining primitives have no
//! maintained pure-Rust implementation with matching output; embedders plug
//! their own [`PowHasher`] for those lanes.

use argon2::{Algorithm, Argon2, Params, Version};
use shared_types::{hash_from_digest, HashPrimitive, PowHashError, H256, HEADER_SIZE};
use tracing::trace;

use crate::ports::PowHasher;

/// Argon2d cost parameters used by lane 3.
pub const ARGON2D_MEMORY_KIB: u32 = 4096;
pub const ARGON2D_ITERATIONS: u32 = 1;
pub const ARGON2D_PARALLELISM: u32 = 1;

#[derive(Debug, Default, Clone, Copy)]
pub struct NativePowHasher;

impl NativePowHasher {
    pub fn new() -> Self {
        Self
    }

    /// Argon2d over the header, using the header as its own salt.
    pub fn argon2d(&self, header: &[u8; HEADER_SIZE]) -> Result<H256, PowHashError> {
        let backend = |reason: argon2::Error| PowHashError::Backend {
            primitive: HashPrimitive::Argon2d,
            reason: reason.to_string(),
        };

        let params = Params::new(
            ARGON2D_MEMORY_KIB,
            ARGON2D_ITERATIONS,
            ARGON2D_PARALLELISM,
            Some(32),
        )
        .map_err(backend)?;

        let mut out = [0u8; 32];
        Argon2::new(Algorithm::Argon2d, Version::V0x13, params)
            .hash_password_into(header, header, &mut out)
            .map_err(backend)?;

        Ok(hash_from_digest(out))
    }
}

impl PowHasher for NativePowHasher {
    fn digest(
        &self,
        primitive: HashPrimitive,
        header: &[u8; HEADER_SIZE],
    ) -> Result<H256, PowHashError> {
        trace!(%primitive, "Hashing header");
        match primitive {
            HashPrimitive::Argon2d => self.argon2d(header),
            other => Err(PowHashError::Unsupported(other)),
        }
    }
}
