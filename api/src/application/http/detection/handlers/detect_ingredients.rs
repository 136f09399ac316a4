use aikitchen_core::domain::ingredient::{entities::DetectionResult, ports::IngredientService};
use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    image_upload::read_image_field,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DetectionData {
    pub ingredients: Vec<String>,
    /// Comma-separated labels, or the "No ingredients detected" sentinel
    pub summary: String,
}

impl From<&DetectionResult> for DetectionData {
    fn from(result: &DetectionResult) -> Self {
        Self {
            ingredients: result.labels().map(str::to_string).collect(),
            summary: result.to_prompt_text(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DetectIngredientsResponse {
    pub data: DetectionData,
}

#[utoipa::path(
    post,
    path = "",
    tag = "detection",
    summary = "Detect ingredients in an image",
    description = "Runs the ingredient detector on a multipart `image` field without touching any session.",
    responses(
        (status = 200, body = DetectIngredientsResponse),
        (status = 400, description = "Missing or undecodable image"),
        (status = 413, description = "Image larger than 10MB")
    ),
)]
pub async fn detect_ingredients(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<DetectIngredientsResponse>, ApiError> {
    let image_data = read_image_field(multipart).await?;

    let result = state
        .service
        .detect_ingredients(image_data)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DetectIngredientsResponse {
        data: DetectionData::from(&result),
    }))
}
