use aikitchen_core::domain::session::{
    ports::KitchenService,
    value_objects::{ChatExchange, SendMessageInput},
};
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    session::validators::SendMessageValidator,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SendMessageResponse {
    pub data: ChatExchange,
}

#[utoipa::path(
    post,
    path = "/{session_id}/messages",
    tag = "session",
    summary = "Send a chat message",
    description = "Appends the user message and the assistant reply to the session transcript. The cached ingredients are added to the prompt according to the configured context policy.",
    responses(
        (status = 200, body = SendMessageResponse),
        (status = 400, description = "Blank or oversized message"),
        (status = 404, description = "Session not found")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
    request_body = SendMessageValidator
)]
pub async fn send_message(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<SendMessageValidator>,
) -> Result<Response<SendMessageResponse>, ApiError> {
    let exchange = state
        .service
        .send_message(SendMessageInput {
            session_id,
            text: payload.text,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SendMessageResponse { data: exchange }))
}
