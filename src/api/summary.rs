//! Catalog summary endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::summary::Summary};

/// Catalog-wide counts for the home page
#[utoipa::path(
    get,
    path = "/summary",
    tag = "summary",
    responses(
        (status = 200, description = "Catalog counts", body = Summary)
    )
)]
pub async fn get_summary(State(state): State<crate::AppState>) -> AppResult<Json<Summary>> {
    let summary = state.services.summary.summary().await?;
    Ok(Json(summary))
}
