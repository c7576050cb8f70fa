//! Mapping use-case service.
//!
//! # Responsibility
//! - Seed the sample mappings into an empty store.
//! - Serve the full public listing and one random public view.
//!
//! # Invariants
//! - Seeding inserts all samples in one transaction, or none.
//! - Seeding never touches a store that already holds rows.

use crate::catalog::{pick_random, Catalog};
use crate::model::mapping::{MappingView, NewMapping};
use crate::repo::mapping_repo::{MappingRepository, RepoError};
use log::info;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `(emoji, movie_name, hint)` rows inserted into an empty table.
pub const SAMPLE_MAPPINGS: &[(&str, &str, &str)] = &[
    (
        "\u{1F3A5}\u{1F575}\u{FE0F}\u{200D}\u{2642}\u{FE0F}",
        "Sherlock Holmes",
        "A famous detective",
    ),
    ("\u{1F680}\u{1F315}", "First Man", "Space and the moon"),
    (
        "\u{1F9D9}\u{200D}\u{2642}\u{FE0F}\u{1F9DD}\u{200D}\u{2640}\u{FE0F}",
        "The Lord of the Rings",
        "A ring and a long journey",
    ),
    ("\u{1F604}\u{1F3AC}", "The Big Smile", "A big grin + movie"),
];

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// No mappings are available to choose from.
    Empty,
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "No emoji mappings available"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Empty => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Builds insert payloads for [`SAMPLE_MAPPINGS`].
pub fn sample_mappings() -> Vec<NewMapping> {
    SAMPLE_MAPPINGS
        .iter()
        .map(|(emoji, movie, hint)| NewMapping::from_emoji(*emoji, *movie, Some(*hint)))
        .collect()
}

/// Use-case wrapper over a mapping repository.
pub struct MappingService<R: MappingRepository> {
    repo: R,
}

impl<R: MappingRepository> MappingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts the sample mappings when the store is empty.
    ///
    /// Returns how many rows were inserted (zero when rows already exist).
    pub fn seed_if_empty(&self) -> ServiceResult<usize> {
        let existing = self.repo.count_mappings()?;
        if existing > 0 {
            info!(
                "event=seed module=service status=skipped existing={}",
                existing
            );
            return Ok(0);
        }

        let ids = self.repo.insert_mappings(&sample_mappings())?;
        info!("event=seed module=service status=ok inserted={}", ids.len());
        Ok(ids.len())
    }

    /// Returns every public view ordered by id.
    pub fn list_views(&self) -> ServiceResult<Vec<MappingView>> {
        let rows = self.repo.list_mappings()?;
        Ok(rows.iter().map(|row| row.view()).collect())
    }

    /// Returns one uniformly chosen public view.
    ///
    /// # Errors
    /// - `ServiceError::Empty` when the store holds no rows.
    pub fn random_view<G: Rng + ?Sized>(&self, rng: &mut G) -> ServiceResult<MappingView> {
        let rows = self.repo.list_mappings()?;
        pick_random(&rows, rng)
            .map(|row| row.view())
            .ok_or(ServiceError::Empty)
    }

    /// Snapshots the current store contents into an immutable catalog.
    pub fn snapshot(&self) -> ServiceResult<Catalog> {
        Ok(Catalog::new(self.list_views()?))
    }

    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count_mappings()?)
    }
}
