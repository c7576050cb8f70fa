//! Shared request state.
//!
//! # Invariants
//! - State is built once before the listener starts and only read afterwards.
//! - The JSON backend is an immutable catalog; the SQLite backend reads live
//!   rows through one connection guarded by a mutex.

use crate::error::{ApiError, StartupError};
use emojimovie_core::db::{open_db, open_db_in_memory};
use emojimovie_core::{
    load_records, AppConfig, Backend, Catalog, MappingService, MappingView, ServiceError,
    SqliteMappingRepository,
};
use log::info;
use rusqlite::Connection;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Record source behind the handlers.
pub enum MappingBackend {
    Sqlite(Mutex<Connection>),
    Catalog(Catalog),
}

impl MappingBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => Backend::Sqlite.as_str(),
            Self::Catalog(_) => Backend::Json.as_str(),
        }
    }
}

pub struct AppState {
    backend: MappingBackend,
    started_at: Instant,
}

impl AppState {
    pub fn new(backend: MappingBackend) -> Self {
        Self {
            backend,
            started_at: Instant::now(),
        }
    }

    /// Opens the configured backend, seeding an empty SQLite table when
    /// enabled.
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let backend = match config.storage.backend {
            Backend::Sqlite => {
                let conn = open_db(&config.storage.sqlite_path)?;
                if config.storage.seed_on_empty {
                    MappingService::new(SqliteMappingRepository::new(&conn)).seed_if_empty()?;
                }
                MappingBackend::Sqlite(Mutex::new(conn))
            }
            Backend::Json => {
                let records = load_records(&config.storage.json_path, &config.fields)?;
                MappingBackend::Catalog(Catalog::from_records(records))
            }
        };

        info!(
            "event=state_init module=server status=ok backend={}",
            backend.name()
        );
        Ok(Self::new(backend))
    }

    /// Seeded in-memory SQLite state, used by tests and `--demo` runs.
    pub fn seeded_in_memory() -> Result<Self, StartupError> {
        let conn = open_db_in_memory()?;
        MappingService::new(SqliteMappingRepository::new(&conn)).seed_if_empty()?;
        Ok(Self::new(MappingBackend::Sqlite(Mutex::new(conn))))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn random_view(&self) -> Result<MappingView, ApiError> {
        let mut rng = rand::thread_rng();
        match &self.backend {
            MappingBackend::Sqlite(conn) => {
                let conn = lock(conn)?;
                Ok(MappingService::new(SqliteMappingRepository::new(&conn)).random_view(&mut rng)?)
            }
            MappingBackend::Catalog(catalog) => catalog
                .random(&mut rng)
                .cloned()
                .ok_or_else(|| ServiceError::Empty.into()),
        }
    }

    pub fn list_views(&self) -> Result<Vec<MappingView>, ApiError> {
        match &self.backend {
            MappingBackend::Sqlite(conn) => {
                let conn = lock(conn)?;
                Ok(MappingService::new(SqliteMappingRepository::new(&conn)).list_views()?)
            }
            MappingBackend::Catalog(catalog) => Ok(catalog.items().to_vec()),
        }
    }

    pub fn count(&self) -> Result<u64, ApiError> {
        match &self.backend {
            MappingBackend::Sqlite(conn) => {
                let conn = lock(conn)?;
                Ok(MappingService::new(SqliteMappingRepository::new(&conn)).count()?)
            }
            MappingBackend::Catalog(catalog) => Ok(catalog.len() as u64),
        }
    }
}

fn lock(conn: &Mutex<Connection>) -> Result<std::sync::MutexGuard<'_, Connection>, ApiError> {
    conn.lock()
        .map_err(|_| ApiError::Internal("storage connection poisoned".to_string()))
}
