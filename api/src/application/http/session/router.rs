use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::create_session::{__path_create_session, create_session};
use super::handlers::delete_session::{__path_delete_session, delete_session};
use super::handlers::export_recipe::{__path_export_recipe, export_recipe};
use super::handlers::get_session::{__path_get_session, get_session};
use super::handlers::send_message::{__path_send_message, send_message};
use super::handlers::submit_image::{__path_submit_image, submit_image};
use crate::application::http::{image_upload::MAX_UPLOAD_BODY, server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    create_session,
    get_session,
    delete_session,
    submit_image,
    send_message,
    export_recipe
))]
pub struct SessionApiDoc;

pub fn session_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/sessions", state.args.server.root_path),
            post(create_session),
        )
        .route(
            &format!("{}/sessions/{{session_id}}", state.args.server.root_path),
            get(get_session).delete(delete_session),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/image",
                state.args.server.root_path
            ),
            post(submit_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/messages",
                state.args.server.root_path
            ),
            post(send_message),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/recipe",
                state.args.server.root_path
            ),
            get(export_recipe),
        )
}
