//! Author model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::Book;

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author create/update request. Updates are full-replace: every field is
/// written, missing optional dates clear the stored value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[validate(length(min = 1, message = "First name must be specified"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Family name must be specified"))]
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorForm {
    /// Trim surrounding whitespace from text fields before validation.
    pub fn trimmed(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.family_name = self.family_name.trim().to_string();
        self
    }
}

/// Author detail view: the author plus the books that reference them
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorDetails {
    pub author: Author,
    pub books: Vec<Book>,
}
