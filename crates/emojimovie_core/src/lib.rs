//! Core domain logic for the emoji movie service.
//! Storage, record loading and codepoint conversion live here; transports
//! stay in the server and CLI crates.

pub mod catalog;
pub mod codepoint;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod source;

pub use catalog::Catalog;
pub use codepoint::{convert, convert_opt, encode};
pub use config::{AppConfig, Backend, ConfigError, FieldAliases};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::mapping::{EmojiMapping, MappingId, MappingView, NewMapping};
pub use repo::mapping_repo::{MappingRepository, RepoError, RepoResult, SqliteMappingRepository};
pub use service::mapping_service::{MappingService, ServiceError, ServiceResult};
pub use source::json_file::{load_records, ResolvedRecord, SourceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
