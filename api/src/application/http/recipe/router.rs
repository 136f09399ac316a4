use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::request_recipe::{__path_request_recipe, request_recipe};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(request_recipe))]
pub struct RecipeApiDoc;

pub fn recipe_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/recipes", state.args.server.root_path),
        post(request_recipe),
    )
}
