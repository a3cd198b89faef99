//! Book copy management service

use crate::{
    error::AppResult,
    models::{
        book::BookListItem,
        book_copy::{BookCopy, BookCopyForm, CopyDetails, CopyListItem},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CopiesService {
    repository: Repository,
}

impl CopiesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<CopyListItem>> {
        self.repository.copies.list().await
    }

    /// Get a copy with its book reference expanded. The reference is
    /// advisory, so a dangling book_id yields `book: None`.
    pub async fn details(&self, id: i32) -> AppResult<CopyDetails> {
        let copy = self.repository.copies.get_by_id(id).await?;
        let book = self.repository.books.find_by_id(copy.book_id).await?;

        Ok(CopyDetails { copy, book })
    }

    pub async fn create(&self, form: &BookCopyForm) -> AppResult<BookCopy> {
        self.repository.copies.create(form).await
    }

    pub async fn update(&self, id: i32, form: &BookCopyForm) -> AppResult<BookCopy> {
        self.repository.copies.update(id, form).await
    }

    /// Copies have no dependents and are always deletable.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.copies.delete(id).await
    }

    /// Book list for the copy form's book selector.
    pub async fn form_books(&self) -> AppResult<Vec<BookListItem>> {
        self.repository.books.list().await
    }
}
