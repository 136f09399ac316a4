use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    application::http::server::app_state::AppState,
    args::{Args, FlowMode},
};

/// Runtime settings that are safe to show to clients.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct PublicConfig {
    pub flow_mode: String,
    pub ingredient_context: String,
    pub detector_input_size: u32,
    pub detector_confidence: f32,
}

impl From<&Args> for PublicConfig {
    fn from(args: &Args) -> Self {
        Self {
            flow_mode: match args.flow.mode {
                FlowMode::Remote => "remote".to_string(),
                FlowMode::Local => "local".to_string(),
            },
            ingredient_context: args.conversation.ingredient_context.to_string(),
            detector_input_size: args.detector.input_size,
            detector_confidence: args.detector.confidence,
        }
    }
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Public configuration",
    responses(
        (status = 200, body = PublicConfig)
    ),
)]
pub async fn get_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(PublicConfig::from(state.args.as_ref()))
}
