//! Authors repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorForm},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors ordered by family name. Sorting is byte-order
    /// (COLLATE "C"), so uppercase sorts before lowercase.
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death,
                   created_at, updated_at
            FROM authors
            ORDER BY family_name COLLATE "C" ASC, first_name COLLATE "C" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Lookup that distinguishes "absent" from a store failure, for
    /// advisory reference expansion.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death,
                   created_at, updated_at
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<Author> {
        let now = Utc::now();

        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, first_name, family_name, date_of_birth, date_of_death,
                      created_at, updated_at
            "#,
        )
        .bind(&form.first_name)
        .bind(&form.family_name)
        .bind(form.date_of_birth)
        .bind(form.date_of_death)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(author)
    }

    /// Full-replace update: every column is written from the form.
    pub async fn update(&self, id: i32, form: &AuthorForm) -> AppResult<Author> {
        let now = Utc::now();

        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors SET
                first_name = $1,
                family_name = $2,
                date_of_birth = $3,
                date_of_death = $4,
                updated_at = $5
            WHERE id = $6
            RETURNING id, first_name, family_name, date_of_birth, date_of_death,
                      created_at, updated_at
            "#,
        )
        .bind(&form.first_name)
        .bind(&form.family_name)
        .bind(form.date_of_birth)
        .bind(form.date_of_death)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Conditional delete: removes the author only if no book references it
    /// at commit time. Returns false when a dependent book blocked the
    /// delete.
    pub async fn delete_if_unreferenced(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM authors
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM books WHERE author_id = $1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    // The list queries sort with COLLATE "C": plain byte order, which for
    // ASCII data matches Rust's str ordering. This pins the documented
    // collation rule against sample data.
    #[test]
    fn collation_rule_is_byte_order() {
        let mut names = vec!["ant", "Zebra", "Austen", "austen"];
        names.sort();
        assert_eq!(names, vec!["Austen", "Zebra", "ant", "austen"]);
    }
}
