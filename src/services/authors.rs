//! Author management service

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorDetails, AuthorForm},
        book::Book,
    },
    repository::Repository,
    services::DeleteOutcome,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Get an author with the books that reference them.
    pub async fn details(&self, id: i32) -> AppResult<AuthorDetails> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.books.list_by_author(id).await?;

        Ok(AuthorDetails { author, books })
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<Author> {
        self.repository.authors.create(form).await
    }

    pub async fn update(&self, id: i32, form: &AuthorForm) -> AppResult<Author> {
        self.repository.authors.update(id, form).await
    }

    /// The books referencing an author — its delete-blocking dependents.
    pub async fn dependents(&self, id: i32) -> AppResult<Vec<Book>> {
        self.repository.books.list_by_author(id).await
    }

    /// Delete an author unless books reference them. Same two-step shape as
    /// the book delete: dependents feed the blocked response, the delete
    /// statement re-checks the condition at commit time.
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome<Book>> {
        self.repository.authors.get_by_id(id).await?;

        let dependents = self.dependents(id).await?;
        if !dependents.is_empty() {
            return Ok(DeleteOutcome::Blocked { dependents });
        }

        if self.repository.authors.delete_if_unreferenced(id).await? {
            Ok(DeleteOutcome::Deleted)
        } else {
            let dependents = self.dependents(id).await?;
            Ok(DeleteOutcome::Blocked { dependents })
        }
    }
}
