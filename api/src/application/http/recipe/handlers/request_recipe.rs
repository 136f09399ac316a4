use aikitchen_core::domain::recipe::{ports::RecipeService, value_objects::PromptRequest};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    recipe::validators::RequestRecipeValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecipeText {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RequestRecipeResponse {
    pub data: RecipeText,
}

#[utoipa::path(
    post,
    path = "",
    tag = "recipe",
    summary = "Ask the assistant directly",
    description = "Sends the prompt to the configured flow as is. Unlike the session routes, a failed call is reported as 502 with a code naming the cause.",
    responses(
        (status = 200, body = RequestRecipeResponse),
        (status = 400, description = "Blank or oversized prompt"),
        (status = 502, body = ApiErrorResponse, description = "Flow call failed")
    ),
    request_body = RequestRecipeValidator
)]
pub async fn request_recipe(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RequestRecipeValidator>,
) -> Result<Response<RequestRecipeResponse>, ApiError> {
    let text = state
        .service
        .request_recipe(PromptRequest::Text(payload.prompt), payload.session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RequestRecipeResponse {
        data: RecipeText { text },
    }))
}
