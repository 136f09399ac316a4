use aikitchen_core::domain::session::ports::KitchenService;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteSessionResponse {
    pub data: DeletedSession,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeletedSession {
    pub deleted: bool,
}

#[utoipa::path(
    delete,
    path = "/{session_id}",
    tag = "session",
    summary = "End a chat session",
    responses(
        (status = 200, body = DeleteSessionResponse),
        (status = 404, description = "Session not found")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn delete_session(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<DeleteSessionResponse>, ApiError> {
    state
        .service
        .delete_session(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteSessionResponse {
        data: DeletedSession { deleted: true },
    }))
}
