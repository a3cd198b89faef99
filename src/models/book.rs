//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    author::Author,
    book_copy::BookCopy,
    genre::{Genre, GenreOption},
};

/// Full book model from database. Genre references live in the
/// `book_genres` junction table and are carried separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book row for list views, with the author name resolved by the query
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookListItem {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub author_name: Option<String>,
}

/// Book create/update request. `genre_ids` defaults to an empty sequence
/// when the field is absent; updates are full-replace.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    pub author_id: i32,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

impl BookForm {
    pub fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.summary = self.summary.trim().to_string();
        self.isbn = self.isbn.trim().to_string();
        self
    }
}

/// Book detail view: the book with its references expanded and its copies.
///
/// References are advisory, so a dangling `author_id` yields `author: None`
/// rather than an error; `genres` follows the stored attachment order.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetails {
    pub book: Book,
    pub genre_ids: Vec<i32>,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub copies: Vec<BookCopy>,
}

/// Data needed to render the book create/edit form: all authors (sorted by
/// family name), all genres with the book's current ones pre-checked, and
/// the book being edited if any.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormContext {
    pub authors: Vec<Author>,
    pub genres: Vec<GenreOption>,
    pub book: Option<Book>,
}
