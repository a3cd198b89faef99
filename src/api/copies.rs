//! Book copy endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::BookListItem,
        book_copy::{BookCopy, BookCopyForm, CopyDetails, CopyListItem},
    },
};

/// List all copies with their book titles
#[utoipa::path(
    get,
    path = "/copies",
    tag = "copies",
    responses(
        (status = 200, description = "List of copies", body = Vec<CopyListItem>)
    )
)]
pub async fn list_copies(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<CopyListItem>>> {
    let copies = state.services.copies.list().await?;
    Ok(Json(copies))
}

/// Get copy details with its book expanded
#[utoipa::path(
    get,
    path = "/copies/{id}",
    tag = "copies",
    params(
        ("id" = i32, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Copy details", body = CopyDetails),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_copy(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CopyDetails>> {
    let details = state.services.copies.details(id).await?;
    Ok(Json(details))
}

/// Create a copy. Status defaults to Maintenance, due_back to now.
#[utoipa::path(
    post,
    path = "/copies",
    tag = "copies",
    request_body = BookCopyForm,
    responses(
        (status = 201, description = "Copy created", body = BookCopy),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_copy(
    State(state): State<crate::AppState>,
    Json(form): Json<BookCopyForm>,
) -> AppResult<(StatusCode, Json<BookCopy>)> {
    let form = form.trimmed();
    form.validate()?;

    let created = state.services.copies.create(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing copy (full replace)
#[utoipa::path(
    put,
    path = "/copies/{id}",
    tag = "copies",
    params(
        ("id" = i32, Path, description = "Copy ID")
    ),
    request_body = BookCopyForm,
    responses(
        (status = 200, description = "Copy updated", body = BookCopy),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_copy(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<BookCopyForm>,
) -> AppResult<Json<BookCopy>> {
    let form = form.trimmed();
    form.validate()?;

    let updated = state.services.copies.update(id, &form).await?;
    Ok(Json(updated))
}

/// Delete a copy (always permitted)
#[utoipa::path(
    delete,
    path = "/copies/{id}",
    tag = "copies",
    params(
        ("id" = i32, Path, description = "Copy ID")
    ),
    responses(
        (status = 204, description = "Copy deleted"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn delete_copy(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.copies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Book list for the copy form's book selector
#[utoipa::path(
    get,
    path = "/copies/form",
    tag = "copies",
    responses(
        (status = 200, description = "Books to pick from", body = Vec<BookListItem>)
    )
)]
pub async fn copy_form(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookListItem>>> {
    let books = state.services.copies.form_books().await?;
    Ok(Json(books))
}
