//! Adapters for the outbound ports.

pub mod native_hasher;

pub use native_hasher::NativePowHasher;
