use utoipa::OpenApi;

use crate::application::http::{
    detection::router::DetectionApiDoc, recipe::router::RecipeApiDoc,
    server::config::__path_get_config, session::router::SessionApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI Kitchen API"
    ),
    paths(get_config),
    nest(
        (path = "/sessions", api = SessionApiDoc),
        (path = "/detections", api = DetectionApiDoc),
        (path = "/recipes", api = RecipeApiDoc),
    )
)]
pub struct ApiDoc;
