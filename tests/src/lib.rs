//! # Polyalgo-Chain Test Suite
//!
//! Cross-crate scenarios for the validation core.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── fixtures.rs      # Chain builders, scenario hasher, mining loop
//! │   └── integration/     # Multi-crate scenarios
//! │       ├── genesis.rs
//! │       ├── pipeline.rs
//! │       ├── retargeting.rs
//! │       └── checkpoints.rs
//! ├── tests/
//! │   └── registry.rs      # Process-wide profile selection (own binary)
//! └── benches/
//!     └── validation_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pa-tests
//! cargo test -p pa-tests integration::retargeting
//! cargo bench -p pa-tests
//! ```

pub mod fixtures;
pub mod integration;
