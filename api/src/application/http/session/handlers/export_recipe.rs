use aikitchen_core::domain::session::ports::KitchenService;
use axum::{
    extract::{Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub const RECIPE_FILE_NAME: &str = "recipe.txt";

#[utoipa::path(
    get,
    path = "/{session_id}/recipe",
    tag = "session",
    summary = "Download the latest recipe",
    description = "Returns the most recent assistant reply as a plain text attachment.",
    responses(
        (status = 200, description = "Recipe text", content_type = "text/plain", body = String),
        (status = 404, description = "Session not found or no reply yet")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn export_recipe(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let recipe = state
        .service
        .export_recipe(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", RECIPE_FILE_NAME),
            ),
        ],
        recipe,
    ))
}
