use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RequestRecipeValidator {
    #[validate(length(min = 1, max = 5000, message = "prompt must be 1 to 5000 characters"))]
    pub prompt: String,

    /// Forwarded to the flow so its memory component can key the conversation
    #[serde(default)]
    #[validate(length(min = 1, max = 256, message = "session_id must be 1 to 256 characters"))]
    pub session_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_is_optional() {
        let payload: RequestRecipeValidator =
            serde_json::from_str(r#"{"prompt": "egg, tomato"}"#).unwrap();
        assert!(payload.session_id.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let payload = RequestRecipeValidator {
            prompt: String::new(),
            session_id: None,
        };
        assert!(payload.validate().is_err());
    }
}
