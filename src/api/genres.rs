//! Genre endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::genre::{Genre, GenreDetails, GenreForm},
};

/// List all genres, sorted by name
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "List of genres", body = Vec<Genre>)
    )
)]
pub async fn list_genres(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.genres.list().await?;
    Ok(Json(genres))
}

/// Get genre details with the books filed under it
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre details", body = GenreDetails),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<GenreDetails>> {
    let details = state.services.genres.details(id).await?;
    Ok(Json(details))
}

/// Create a genre. A name matching an existing genre returns that genre
/// (200) instead of writing a duplicate (201).
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    request_body = GenreForm,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 200, description = "Name matched an existing genre", body = Genre),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    Json(form): Json<GenreForm>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let form = form.trimmed();
    form.validate()?;

    let write = state.services.genres.create(&form).await?;
    let status = if write.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(write.genre)))
}

/// Update a genre. A name matching a different existing genre discards the
/// write and returns that genre as canonical.
#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    request_body = GenreForm,
    responses(
        (status = 200, description = "Canonical genre for the name", body = Genre),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<GenreForm>,
) -> AppResult<Json<Genre>> {
    let form = form.trimmed();
    form.validate()?;

    let genre = state.services.genres.update(id, &form).await?;
    Ok(Json(genre))
}

/// Delete a genre (always permitted)
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.genres.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
