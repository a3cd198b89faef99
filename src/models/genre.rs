//! Genre model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::Book;

/// Full genre model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Genre create/update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenreForm {
    #[validate(length(min = 1, message = "Genre name required"))]
    pub name: String,
}

impl GenreForm {
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

/// Genre detail view: the genre plus the books filed under it
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreDetails {
    pub genre: Genre,
    pub books: Vec<Book>,
}

/// Genre with a selection flag, for pre-checking a book's genres in the
/// edit form
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreOption {
    pub genre: Genre,
    pub checked: bool,
}
