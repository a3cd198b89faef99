//! Catalog summary service

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::book_copy::CopyStatus, repository::Repository};

/// Count-based dashboard view across the four collections
#[derive(Debug, Serialize, ToSchema)]
pub struct Summary {
    pub book_count: i64,
    pub book_copy_count: i64,
    pub available_book_copy_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct SummaryService {
    repository: Repository,
}

impl SummaryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Five independent counts, no join. The sub-queries run back to back
    /// without a transaction, so concurrent mutations can skew counts
    /// against each other; acceptable for a dashboard.
    pub async fn summary(&self) -> AppResult<Summary> {
        let book_count = self.repository.books.count().await?;
        let book_copy_count = self.repository.copies.count().await?;
        let available_book_copy_count = self
            .repository
            .copies
            .count_with_status(CopyStatus::Available)
            .await?;
        let author_count = self.repository.authors.count().await?;
        let genre_count = self.repository.genres.count().await?;

        Ok(Summary {
            book_count,
            book_copy_count,
            available_book_copy_count,
            author_count,
            genre_count,
        })
    }
}
