//! Repository layer for mapping persistence.
//!
//! # Invariants
//! - Repository writes enforce `NewMapping::validate()` before persistence.
//! - Read paths reject invalid persisted rows instead of masking them.

pub mod mapping_repo;
