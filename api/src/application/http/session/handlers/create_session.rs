use aikitchen_core::domain::session::{entities::Session, ports::KitchenService};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SessionResponse {
    pub data: Session,
}

#[utoipa::path(
    post,
    path = "",
    tag = "session",
    summary = "Start a chat session",
    description = "Creates an empty session with no transcript and no cached ingredients.",
    responses(
        (status = 200, body = SessionResponse)
    ),
)]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let session = state
        .service
        .create_session()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SessionResponse { data: session }))
}
