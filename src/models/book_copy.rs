//! Book copy (physical item) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::Book;

/// Loan status of a physical copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum CopyStatus {
    Available = 0,
    Maintenance = 1,
    Loaned = 2,
    Reserved = 3,
}

impl From<i16> for CopyStatus {
    fn from(v: i16) -> Self {
        match v {
            0 => CopyStatus::Available,
            2 => CopyStatus::Loaned,
            3 => CopyStatus::Reserved,
            _ => CopyStatus::Maintenance,
        }
    }
}

impl From<CopyStatus> for i16 {
    fn from(s: CopyStatus) -> Self {
        s as i16
    }
}

impl Default for CopyStatus {
    fn default() -> Self {
        CopyStatus::Maintenance
    }
}

impl std::fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CopyStatus::Available => "Available",
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::Loaned => "Loaned",
            CopyStatus::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

/// Full book copy model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookCopy {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    pub status: i16, // 0=Available, 1=Maintenance, 2=Loaned, 3=Reserved
    pub due_back: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Copy row for list views, with the book title resolved by the query
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CopyListItem {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    pub status: i16,
    pub due_back: DateTime<Utc>,
    pub book_title: Option<String>,
}

/// Copy create/update request. Status defaults to Maintenance and
/// `due_back` to the creation timestamp when unspecified.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookCopyForm {
    pub book_id: i32,
    #[validate(length(min = 1, message = "Imprint must not be empty."))]
    pub imprint: String,
    pub status: Option<CopyStatus>,
    pub due_back: Option<DateTime<Utc>>,
}

impl BookCopyForm {
    pub fn trimmed(mut self) -> Self {
        self.imprint = self.imprint.trim().to_string();
        self
    }
}

/// Copy detail view: the copy plus its book (None if the reference dangles)
#[derive(Debug, Serialize, ToSchema)]
pub struct CopyDetails {
    pub copy: BookCopy,
    pub book: Option<Book>,
}
