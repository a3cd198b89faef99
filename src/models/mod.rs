//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_copy;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorDetails};
pub use book::{Book, BookDetails, BookListItem};
pub use book_copy::{BookCopy, CopyDetails, CopyStatus};
pub use genre::{Genre, GenreDetails};
