//! Author endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{Author, AuthorDetails, AuthorForm},
    services::DeleteOutcome,
};

/// List all authors, sorted by family name
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "List of authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Get author details with their books
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorDetails),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetails>> {
    let details = state.services.authors.details(id).await?;
    Ok(Json(details))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = AuthorForm,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(form): Json<AuthorForm>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let form = form.trimmed();
    form.validate()?;

    let created = state.services.authors.create(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing author (full replace)
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = AuthorForm,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<AuthorForm>,
) -> AppResult<Json<Author>> {
    let form = form.trimmed();
    form.validate()?;

    let updated = state.services.authors.update(id, &form).await?;
    Ok(Json(updated))
}

/// Delete an author. Blocked (409, with the books listed) while books
/// reference them.
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author has books; body lists the blocking dependents")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let outcome = state.services.authors.delete(id).await?;
    Ok(match outcome {
        DeleteOutcome::Deleted => StatusCode::NO_CONTENT.into_response(),
        blocked => (StatusCode::CONFLICT, Json(blocked)).into_response(),
    })
}
