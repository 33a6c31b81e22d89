//! # Shared Types Crate
//!
//! Types shared by every consensus crate of the validation core.
//!
//! ## Design Principles
//!
//! - **Display-order hashes**: every 256-bit hash is held as an [`H256`] in
//!   the order it is printed (most significant byte first). Conversion to the
//!   little-endian wire order happens only at serialization boundaries.
//! - **Read-only chain view**: the chain-index graph is owned by an external
//!   store; this crate only defines the [`ChainIndex`] port it must satisfy and
//!   an arena implementation used by tests and embedders.
//! - **No lossy arithmetic**: targets are [`U256`] values; the 32-bit compact
//!   form is decoded and encoded by [`CompactTarget`] exactly as it is
//!   persisted in headers.

pub mod chain_index;
pub mod compact;
pub mod entities;
pub mod errors;
pub mod hashing;

pub use chain_index::*;
pub use compact::*;
pub use entities::*;
pub use errors::*;
