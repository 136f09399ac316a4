pub mod detection;
pub mod health;
pub mod image_upload;
pub mod recipe;
pub mod server;
pub mod session;
