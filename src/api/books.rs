//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookDetails, BookForm, BookFormContext, BookListItem},
    services::DeleteOutcome,
};

/// List all books, sorted by title
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<BookListItem>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookListItem>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book details: the book with author and genres expanded, plus its copies
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let details = state.services.books.details(id).await?;
    Ok(Json(details))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookForm,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(form): Json<BookForm>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let form = form.trimmed();
    form.validate()?;

    let created = state.services.books.create(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book (full replace)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookForm,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<BookForm>,
) -> AppResult<Json<Book>> {
    let form = form.trimmed();
    form.validate()?;

    let updated = state.services.books.update(id, &form).await?;
    Ok(Json(updated))
}

/// Delete a book. Blocked (409, with the copies listed) while copies of it
/// exist.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book has copies; body lists the blocking dependents")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let outcome = state.services.books.delete(id).await?;
    Ok(match outcome {
        DeleteOutcome::Deleted => StatusCode::NO_CONTENT.into_response(),
        blocked => (StatusCode::CONFLICT, Json(blocked)).into_response(),
    })
}

/// Context for the book create form
#[utoipa::path(
    get,
    path = "/books/form",
    tag = "books",
    responses(
        (status = 200, description = "Authors and genres for the form", body = BookFormContext)
    )
)]
pub async fn book_create_form(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BookFormContext>> {
    let context = state.services.books.form_context(None).await?;
    Ok(Json(context))
}

/// Context for the book edit form, with the book's genres pre-checked
#[utoipa::path(
    get,
    path = "/books/{id}/form",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Form context", body = BookFormContext),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_edit_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookFormContext>> {
    let context = state.services.books.form_context(Some(id)).await?;
    Ok(Json(context))
}
