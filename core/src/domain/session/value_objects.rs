use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ingredient::entities::DetectionResult, session::entities::ConversationTurn};

#[derive(Debug, Clone)]
pub struct SubmitImageInput {
    pub session_id: Uuid,
    pub image_data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct SendMessageInput {
    pub session_id: Uuid,
    pub text: String,
}

/// Outcome of an image submission: what was seen and what the assistant said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageSubmission {
    pub ingredients: DetectionResult,
    pub reply: ConversationTurn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatExchange {
    pub user: ConversationTurn,
    pub assistant: ConversationTurn,
}
