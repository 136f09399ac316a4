use aikitchen_core::domain::{
    common::entities::app_errors::CoreError,
    recipe::entities::{RecipeError, RecipeErrorKind},
};
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{message}")]
    BadGateway {
        kind: Option<RecipeErrorKind>,
        message: String,
    },

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "E_BAD_REQUEST",
            ApiError::ValidationError(_) => "E_VALIDATION",
            ApiError::NotFound(_) => "E_NOT_FOUND",
            ApiError::PayloadTooLarge(_) => "E_PAYLOAD_TOO_LARGE",
            ApiError::BadGateway { kind, .. } => match kind {
                Some(RecipeErrorKind::Network) => "E_FLOW_NETWORK",
                Some(RecipeErrorKind::Backend) => "E_FLOW_BACKEND",
                Some(RecipeErrorKind::Decode) => "E_FLOW_DECODE",
                Some(RecipeErrorKind::MissingMessage) => "E_FLOW_NO_MESSAGE",
                None => "E_BAD_GATEWAY",
            },
            ApiError::InternalServerError(_) => "E_INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            CoreError::Invalid(message) => ApiError::BadRequest(message),
            CoreError::InvalidImage(message) => {
                ApiError::BadRequest(format!("Invalid image: {}", message))
            }
            CoreError::ExternalServiceError(message) => ApiError::BadGateway {
                kind: None,
                message,
            },
            CoreError::DetectionError(message) | CoreError::ConfigurationError(message) => {
                tracing::error!("Internal failure: {}", message);
                ApiError::InternalServerError("Internal server error".to_string())
            }
            CoreError::InternalServerError => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<RecipeError> for ApiError {
    fn from(error: RecipeError) -> Self {
        ApiError::BadGateway {
            kind: Some(error.kind()),
            message: error.fallback_text().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that runs `validator` rules before the handler sees the payload.
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_statuses() {
        let cases = [
            (CoreError::NotFound, StatusCode::NOT_FOUND),
            (CoreError::Invalid("empty".into()), StatusCode::BAD_REQUEST),
            (
                CoreError::InvalidImage("not a png".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::ExternalServiceError("refused".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                CoreError::DetectionError("shape".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CoreError::InternalServerError,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).into_response().status(), status);
        }
    }

    #[test]
    fn recipe_errors_keep_their_kind() {
        let error = ApiError::from(RecipeError::MissingMessage);
        assert_eq!(error.code(), "E_FLOW_NO_MESSAGE");
        assert_eq!(error.to_string(), "No valid message found in response.");

        let error = ApiError::from(RecipeError::Network("connection refused".into()));
        assert_eq!(error.code(), "E_FLOW_NETWORK");
        assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.to_string(), "Failed to run the AI process.");
    }

    #[test]
    fn detection_detail_is_not_leaked() {
        let error = ApiError::from(CoreError::DetectionError("tensor shape [1, 2]".into()));
        assert_eq!(error.to_string(), "Internal server error");
    }
}
