//! Emoji/movie mapping domain model.
//!
//! # Invariants
//! - Stored mappings always carry a non-blank emoji, sequence and movie name.
//! - Callers outside storage only ever see the `MappingView` projection.

pub mod mapping;
