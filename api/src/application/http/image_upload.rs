use axum::{
    extract::{Multipart, multipart::MultipartError},
    http::StatusCode,
};

use crate::application::http::server::api_entities::api_error::ApiError;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Request body cap for upload routes; leaves room for multipart framing.
pub const MAX_UPLOAD_BODY: usize = MAX_IMAGE_SIZE + 64 * 1024;

/// Reads the `image` field of a multipart upload. Other fields are ignored.
pub async fn read_image_field(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart field", e))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read image", e))?;

        check_image_size(data.len())?;
        image_data = Some(data.to_vec());
    }

    let image_data =
        image_data.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    if image_data.is_empty() {
        return Err(ApiError::BadRequest("Image field is empty".to_string()));
    }

    Ok(image_data)
}

/// A body cut off by `DefaultBodyLimit` surfaces here as a multipart error.
fn multipart_error(context: &str, error: MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge(format!(
            "Image too large. Max size is {} bytes",
            MAX_IMAGE_SIZE
        ));
    }
    ApiError::BadRequest(format!("{}: {}", context, error))
}

fn check_image_size(len: usize) -> Result<(), ApiError> {
    if len > MAX_IMAGE_SIZE {
        return Err(ApiError::PayloadTooLarge(format!(
            "Image too large. Max size is {} bytes",
            MAX_IMAGE_SIZE
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{Router, extract::DefaultBodyLimit, routing::post};
    use axum_test::{
        TestServer,
        multipart::{MultipartForm, Part},
    };

    use super::*;

    async fn upload(multipart: Multipart) -> Result<String, ApiError> {
        read_image_field(multipart)
            .await
            .map(|image| image.len().to_string())
    }

    fn server() -> TestServer {
        let router = Router::new().route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
        );
        TestServer::new(router).unwrap()
    }

    fn form(image: Vec<u8>) -> MultipartForm {
        MultipartForm::new().add_part("image", Part::bytes(image).file_name("fridge.jpg"))
    }

    #[test]
    fn accepts_images_up_to_the_limit() {
        assert!(check_image_size(MAX_IMAGE_SIZE).is_ok());
        assert!(matches!(
            check_image_size(MAX_IMAGE_SIZE + 1),
            Err(ApiError::PayloadTooLarge(_))
        ));
    }

    #[tokio::test]
    async fn small_image_is_read() {
        let response = server().post("/upload").multipart(form(vec![7; 1024])).await;

        response.assert_status_ok();
        response.assert_text("1024");
    }

    #[tokio::test]
    async fn body_over_the_route_limit_is_payload_too_large() {
        let response = server()
            .post("/upload")
            .multipart(form(vec![0; 20 * 1024 * 1024]))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert!(response.text().contains("E_PAYLOAD_TOO_LARGE"));
    }

    #[tokio::test]
    async fn missing_image_field_is_bad_request() {
        let form = MultipartForm::new().add_text("note", "no picture");

        let response = server().post("/upload").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
