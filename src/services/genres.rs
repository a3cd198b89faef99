//! Genre management service.
//!
//! Genre name is a soft-unique key: a create or update whose name matches an
//! existing genre resolves to that genre instead of writing a duplicate. The
//! UNIQUE constraint on `genres.name` backstops the lookup-then-write window
//! against concurrent creates.

use crate::{
    error::{AppError, AppResult},
    models::genre::{Genre, GenreDetails, GenreForm},
    repository::Repository,
};

fn is_unique_violation(err: &AppError) -> bool {
    match err {
        AppError::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
        _ => false,
    }
}

/// Result of a genre write: the canonical genre, and whether a new row was
/// actually written (false when the name resolved to an existing genre).
#[derive(Debug)]
pub struct GenreWrite {
    pub genre: Genre,
    pub created: bool,
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    /// Get a genre with the books filed under it.
    pub async fn details(&self, id: i32) -> AppResult<GenreDetails> {
        let genre = self.repository.genres.get_by_id(id).await?;
        let books = self.repository.books.list_by_genre(id).await?;

        Ok(GenreDetails { genre, books })
    }

    /// Create a genre, resolving an exact name match to the existing row.
    pub async fn create(&self, form: &GenreForm) -> AppResult<GenreWrite> {
        if let Some(existing) = self.repository.genres.find_by_name(&form.name).await? {
            return Ok(GenreWrite {
                genre: existing,
                created: false,
            });
        }

        match self.repository.genres.create(&form.name).await {
            Ok(genre) => Ok(GenreWrite {
                genre,
                created: true,
            }),
            // Lost a concurrent create of the same name to the UNIQUE
            // constraint; the winner is the canonical genre.
            Err(e) if is_unique_violation(&e) => {
                let genre = self
                    .repository
                    .genres
                    .find_by_name(&form.name)
                    .await?
                    .ok_or(e)?;
                Ok(GenreWrite {
                    genre,
                    created: false,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Update a genre's name. A name matching a *different* existing genre
    /// discards the write and yields that genre as canonical.
    pub async fn update(&self, id: i32, form: &GenreForm) -> AppResult<Genre> {
        if let Some(existing) = self.repository.genres.find_by_name(&form.name).await? {
            if existing.id != id {
                return Ok(existing);
            }
        }

        match self.repository.genres.update(id, &form.name).await {
            Err(e) if is_unique_violation(&e) => {
                let genre = self
                    .repository
                    .genres
                    .find_by_name(&form.name)
                    .await?
                    .ok_or(e)?;
                Ok(genre)
            }
            other => other,
        }
    }

    /// Genres have no dependents and are always deletable.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }
}
