//! # Proof of Work (Subsystem 02)
//!
//! **Bounded Context:** Lane Selection, Retargeting & PoW Verification
//!
//! ## Purpose
//!
//! Decides, for a candidate header, which of the five mining lanes it belongs
//! to, which hash primitive that lane uses at the header's time, what target
//! the lane currently requires, and whether the header's hash meets it.
//!
//! ## Control Flow
//!
//! ```text
//! header.version ──► classify ──► lane
//!                                  │
//! header.time ──► hash_primitive ◄─┤
//!                                  │
//! chain index ──► DifficultyEngine ┴──► required bits
//!                                           │
//! PowHasher(header) ──► hash ──► check_proof_of_work
//! ```
//!
//! Everything here is pure: no locks, no suspension, no mutation of the
//! chain index.
//!
//! ## Module Structure
//!
//! - [`domain`]: classification, retargeting, verification
//! - [`ports`]: the [`PowHasher`] seam for hash primitives
//! - [`adapters`]: [`NativePowHasher`] (Argon2d)

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::NativePowHasher;
pub use domain::*;
pub use ports::PowHasher;
