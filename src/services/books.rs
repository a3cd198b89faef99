//! Book catalog service: CRUD orchestration, reference expansion and the
//! delete-with-dependents guard.

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookDetails, BookForm, BookFormContext, BookListItem},
        book_copy::BookCopy,
        genre::{Genre, GenreOption},
    },
    repository::Repository,
    services::DeleteOutcome,
};

/// Reassemble batch-fetched genres into the stored attachment order.
/// Ids with no matching genre (dangling references) are skipped.
fn order_genres(genres: Vec<Genre>, ids: &[i32]) -> Vec<Genre> {
    ids.iter()
        .filter_map(|id| genres.iter().find(|g| g.id == *id).cloned())
        .collect()
}

/// Flag each genre that appears in the selected id set. Comparison is by
/// identifier, for pre-checking a book's genres in the edit form.
fn mark_selected(genres: Vec<Genre>, selected_ids: &[i32]) -> Vec<GenreOption> {
    genres
        .into_iter()
        .map(|genre| {
            let checked = selected_ids.contains(&genre.id);
            GenreOption { genre, checked }
        })
        .collect()
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookListItem>> {
        self.repository.books.list().await
    }

    /// Get a book with its references expanded and its copies listed.
    ///
    /// References are resolved as batch fetches: one author lookup and one
    /// genre query for the whole id set, never a lookup per genre. A
    /// dangling author reference yields `author: None`.
    pub async fn details(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.repository.books.get_by_id(id).await?;
        let genre_ids = self.repository.books.genre_ids(id).await?;

        let author = self.repository.authors.find_by_id(book.author_id).await?;
        let genres = self.repository.books.genres_by_ids(&genre_ids).await?;
        let genres = order_genres(genres, &genre_ids);
        let copies = self.repository.copies.list_by_book(id).await?;

        Ok(BookDetails {
            book,
            genre_ids,
            author,
            genres,
            copies,
        })
    }

    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        self.repository.books.create(form).await
    }

    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        self.repository.books.update(id, form).await
    }

    /// The copies referencing a book — its delete-blocking dependents.
    pub async fn dependents(&self, id: i32) -> AppResult<Vec<BookCopy>> {
        self.repository.copies.list_by_book(id).await
    }

    /// Delete a book unless copies reference it. The dependents query feeds
    /// the blocked response; the delete itself re-checks the condition at
    /// commit time, so a copy created in between still blocks it.
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome<BookCopy>> {
        // Missing id is a hard short-circuit, not a fallthrough.
        self.repository.books.get_by_id(id).await?;

        let dependents = self.dependents(id).await?;
        if !dependents.is_empty() {
            return Ok(DeleteOutcome::Blocked { dependents });
        }

        if self.repository.books.delete_if_no_copies(id).await? {
            Ok(DeleteOutcome::Deleted)
        } else {
            // A copy appeared between the check and the delete.
            let dependents = self.dependents(id).await?;
            Ok(DeleteOutcome::Blocked { dependents })
        }
    }

    /// Context for the book create/edit form: all authors (sorted by family
    /// name), all genres with the edited book's attachments pre-checked.
    pub async fn form_context(&self, book_id: Option<i32>) -> AppResult<BookFormContext> {
        let authors = self.repository.authors.list().await?;
        let genres = self.repository.genres.list().await?;

        let (book, selected_ids) = match book_id {
            Some(id) => {
                let book = self.repository.books.get_by_id(id).await?;
                let ids = self.repository.books.genre_ids(id).await?;
                (Some(book), ids)
            }
            None => (None, Vec::new()),
        };

        Ok(BookFormContext {
            authors,
            genres: mark_selected(genres, &selected_ids),
            book,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn genre(id: i32, name: &str) -> Genre {
        let now = Utc::now();
        Genre {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn genres_follow_stored_attachment_order() {
        let fetched = vec![genre(1, "Fantasy"), genre(2, "Horror"), genre(3, "Poetry")];
        let ordered = order_genres(fetched, &[3, 1, 2]);
        let names: Vec<_> = ordered.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Poetry", "Fantasy", "Horror"]);
    }

    #[test]
    fn dangling_genre_ids_are_skipped() {
        let fetched = vec![genre(1, "Fantasy")];
        let ordered = order_genres(fetched, &[7, 1]);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].id, 1);
    }

    #[test]
    fn selection_marking_compares_by_id() {
        let genres = vec![genre(1, "Fantasy"), genre(2, "Horror"), genre(3, "Poetry")];
        let options = mark_selected(genres, &[3, 1]);
        let flags: Vec<_> = options.iter().map(|o| (o.genre.id, o.checked)).collect();
        assert_eq!(flags, vec![(1, true), (2, false), (3, true)]);
    }

    #[test]
    fn empty_selection_marks_nothing() {
        let genres = vec![genre(1, "Fantasy")];
        let options = mark_selected(genres, &[]);
        assert!(!options[0].checked);
    }
}
