pub mod create_session;
pub mod delete_session;
pub mod export_recipe;
pub mod get_session;
pub mod send_message;
pub mod submit_image;
