use aikitchen_core::domain::session::{
    entities::ConversationTurn, ports::KitchenService, value_objects::SubmitImageInput,
};
use axum::extract::{Multipart, Path, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::{
    detection::handlers::detect_ingredients::DetectionData,
    image_upload::read_image_field,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ImageSubmissionData {
    pub ingredients: Vec<String>,
    pub summary: String,
    pub reply: ConversationTurn,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SubmitImageResponse {
    pub data: ImageSubmissionData,
}

#[utoipa::path(
    post,
    path = "/{session_id}/image",
    tag = "session",
    summary = "Submit a food image",
    description = "Detects ingredients in the multipart `image` field, caches them on the session and asks the assistant for recipes. A failed assistant call still yields a reply turn carrying the fallback text.",
    responses(
        (status = 200, body = SubmitImageResponse),
        (status = 400, description = "Missing or undecodable image"),
        (status = 404, description = "Session not found"),
        (status = 413, description = "Image larger than 10MB")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn submit_image(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<SubmitImageResponse>, ApiError> {
    let image_data = read_image_field(multipart).await?;

    let submission = state
        .service
        .submit_image(SubmitImageInput {
            session_id,
            image_data,
        })
        .await
        .map_err(ApiError::from)?;

    let detection = DetectionData::from(&submission.ingredients);

    Ok(Response::OK(SubmitImageResponse {
        data: ImageSubmissionData {
            ingredients: detection.ingredients,
            summary: detection.summary,
            reply: submission.reply,
        },
    }))
}
