use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

pub const FAILED_TO_RUN_FALLBACK: &str = "Failed to run the AI process.";
pub const NO_VALID_MESSAGE_FALLBACK: &str = "No valid message found in response.";

/// Why a conversational backend call produced no reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("no valid message found in response")]
    MissingMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecipeErrorKind {
    Network,
    Backend,
    Decode,
    MissingMessage,
}

impl RecipeError {
    pub fn kind(&self) -> RecipeErrorKind {
        match self {
            RecipeError::Network(_) => RecipeErrorKind::Network,
            RecipeError::Backend(_) => RecipeErrorKind::Backend,
            RecipeError::Decode(_) => RecipeErrorKind::Decode,
            RecipeError::MissingMessage => RecipeErrorKind::MissingMessage,
        }
    }

    /// Text shown to the user in place of a reply.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            RecipeError::MissingMessage => NO_VALID_MESSAGE_FALLBACK,
            RecipeError::Network(_) | RecipeError::Backend(_) | RecipeError::Decode(_) => {
                FAILED_TO_RUN_FALLBACK
            }
        }
    }
}

impl From<RecipeError> for CoreError {
    fn from(error: RecipeError) -> Self {
        CoreError::ExternalServiceError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_message_has_its_own_fallback() {
        assert_eq!(
            RecipeError::MissingMessage.fallback_text(),
            "No valid message found in response."
        );
    }

    #[test]
    fn transport_failures_share_one_fallback() {
        for error in [
            RecipeError::Network("connection refused".into()),
            RecipeError::Backend("502 Bad Gateway".into()),
            RecipeError::Decode("expected value at line 1".into()),
        ] {
            assert_eq!(error.fallback_text(), "Failed to run the AI process.");
        }
    }

    #[test]
    fn kinds_stay_distinguishable() {
        assert_ne!(
            RecipeError::Network(String::new()).kind(),
            RecipeError::Decode(String::new()).kind()
        );
    }
}
