//! Book copies repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book_copy::{BookCopy, BookCopyForm, CopyListItem, CopyStatus},
};

#[derive(Clone)]
pub struct CopiesRepository {
    pool: Pool<Postgres>,
}

impl CopiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all copies with their book titles resolved. The book join is
    /// LEFT: a dangling book_id still lists the copy.
    pub async fn list(&self) -> AppResult<Vec<CopyListItem>> {
        let copies = sqlx::query_as::<_, CopyListItem>(
            r#"
            SELECT c.id, c.book_id, c.imprint, c.status, c.due_back,
                   b.title AS book_title
            FROM book_copies c
            LEFT JOIN books b ON b.id = c.book_id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(copies)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<BookCopy> {
        sqlx::query_as::<_, BookCopy>(
            r#"
            SELECT id, book_id, imprint, status, due_back, created_at, updated_at
            FROM book_copies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book copy with id {} not found", id)))
    }

    /// Copies of the given book. The dependents query behind the book
    /// delete guard.
    pub async fn list_by_book(&self, book_id: i32) -> AppResult<Vec<BookCopy>> {
        let copies = sqlx::query_as::<_, BookCopy>(
            r#"
            SELECT id, book_id, imprint, status, due_back, created_at, updated_at
            FROM book_copies
            WHERE book_id = $1
            ORDER BY id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(copies)
    }

    /// Create a copy. Status defaults to Maintenance, due_back to the
    /// creation timestamp.
    pub async fn create(&self, form: &BookCopyForm) -> AppResult<BookCopy> {
        let now = Utc::now();
        let status = i16::from(form.status.unwrap_or_default());
        let due_back = form.due_back.unwrap_or(now);

        let copy = sqlx::query_as::<_, BookCopy>(
            r#"
            INSERT INTO book_copies (book_id, imprint, status, due_back, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, book_id, imprint, status, due_back, created_at, updated_at
            "#,
        )
        .bind(form.book_id)
        .bind(&form.imprint)
        .bind(status)
        .bind(due_back)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(copy)
    }

    /// Full-replace update. An absent status falls back to Maintenance and
    /// an absent due_back to the update timestamp, mirroring create.
    pub async fn update(&self, id: i32, form: &BookCopyForm) -> AppResult<BookCopy> {
        let now = Utc::now();
        let status = i16::from(form.status.unwrap_or_default());
        let due_back = form.due_back.unwrap_or(now);

        sqlx::query_as::<_, BookCopy>(
            r#"
            UPDATE book_copies SET
                book_id = $1,
                imprint = $2,
                status = $3,
                due_back = $4,
                updated_at = $5
            WHERE id = $6
            RETURNING id, book_id, imprint, status, due_back, created_at, updated_at
            "#,
        )
        .bind(form.book_id)
        .bind(&form.imprint)
        .bind(status)
        .bind(due_back)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book copy with id {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_copies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book copy with id {} not found",
                id
            )));
        }

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_copies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_with_status(&self, status: CopyStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_copies WHERE status = $1")
                .bind(i16::from(status))
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
