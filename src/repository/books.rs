//! Books repository for database operations.
//!
//! Genre references are kept in the `book_genres` junction table with a
//! position column preserving the order the genres were attached in.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookForm, BookListItem},
        genre::Genre,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all books ordered by title, with the author name resolved.
    /// The author join is LEFT: a dangling author_id still lists the book.
    pub async fn list(&self) -> AppResult<Vec<BookListItem>> {
        let books = sqlx::query_as::<_, BookListItem>(
            r#"
            SELECT b.id, b.title, b.author_id,
                   a.first_name || ' ' || a.family_name AS author_name
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            ORDER BY b.title COLLATE "C" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Lookup that distinguishes "absent" from a store failure, for
    /// advisory reference expansion.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author_id, summary, isbn, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Books referencing the given author, ordered by title.
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author_id, summary, isbn, created_at, updated_at
            FROM books
            WHERE author_id = $1
            ORDER BY title COLLATE "C" ASC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Books filed under the given genre, ordered by title.
    pub async fn list_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.id, b.title, b.author_id, b.summary, b.isbn,
                   b.created_at, b.updated_at
            FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = $1
            ORDER BY b.title COLLATE "C" ASC
            "#,
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Genre ids attached to a book, in stored attachment order.
    pub async fn genre_ids(&self, book_id: i32) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT genre_id FROM book_genres WHERE book_id = $1 ORDER BY position",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Batch-fetch genres by id set. One query regardless of how many ids;
    /// dangling ids are silently absent from the result. Call sites that
    /// care about attachment order reassemble it from the id sequence.
    pub async fn genres_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let genres = sqlx::query_as::<_, Genre>(
            "SELECT id, name, created_at, updated_at FROM genres WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let now = Utc::now();

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author_id, summary, isbn, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, title, author_id, summary, isbn, created_at, updated_at
            "#,
        )
        .bind(&form.title)
        .bind(form.author_id)
        .bind(&form.summary)
        .bind(&form.isbn)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.sync_genres(book.id, &form.genre_ids).await?;

        Ok(book)
    }

    /// Full-replace update: all columns and the genre attachments are
    /// rewritten from the form.
    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        let now = Utc::now();

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = $1,
                author_id = $2,
                summary = $3,
                isbn = $4,
                updated_at = $5
            WHERE id = $6
            RETURNING id, title, author_id, summary, isbn, created_at, updated_at
            "#,
        )
        .bind(&form.title)
        .bind(form.author_id)
        .bind(&form.summary)
        .bind(&form.isbn)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        self.sync_genres(id, &form.genre_ids).await?;

        Ok(book)
    }

    /// Conditional delete: removes the book only if no copy references it at
    /// commit time. Returns false when a dependent copy blocked the delete.
    pub async fn delete_if_no_copies(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM book_copies WHERE book_id = $1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(true)
    }

    /// Replace all genre attachments for a book: delete existing rows then
    /// insert the new sequence with positions.
    async fn sync_genres(&self, book_id: i32, genre_ids: &[i32]) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        for (idx, genre_id) in genre_ids.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO book_genres (book_id, genre_id, position)
                VALUES ($1, $2, $3)
                ON CONFLICT (book_id, genre_id) DO UPDATE SET position = $3
                "#,
            )
            .bind(book_id)
            .bind(genre_id)
            .bind((idx + 1) as i16)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
