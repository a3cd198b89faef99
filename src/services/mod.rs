//! Business logic services

pub mod authors;
pub mod books;
pub mod copies;
pub mod genres;
pub mod summary;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, repository::Repository};

/// Outcome of a guarded delete. A Book or Author with dependents cannot be
/// removed; the blocking dependents are carried back so the caller can
/// re-render the confirmation with them listed.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome<T>
where
    T: for<'a> ToSchema<'a>,
{
    Deleted,
    Blocked { dependents: Vec<T> },
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub copies: copies::CopiesService,
    pub genres: genres::GenresService,
    pub summary: summary::SummaryService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            copies: copies::CopiesService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            summary: summary::SummaryService::new(repository.clone()),
            repository,
        }
    }

    /// Verify the catalog store is reachable, for the readiness probe.
    pub async fn ping_store(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
