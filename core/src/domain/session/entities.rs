use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_timestamp, ingredient::entities::DetectionResult,
    recipe::entities::NO_VALID_MESSAGE_FALLBACK,
};

pub const ASSISTANT_AVATAR: &str = "👩🏻‍🍳";
pub const USER_AVATAR: &str = "🎀";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn avatar(&self) -> &'static str {
        match self {
            Role::User => USER_AVATAR,
            Role::Assistant => ASSISTANT_AVATAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    /// Caller guarantees `text` is not blank; see [`ConversationTurn::assistant`].
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(Role::User, text.into())
    }

    /// Blank replies are replaced by the "no valid message" fallback.
    pub fn assistant(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            return Self::with_role(Role::Assistant, NO_VALID_MESSAGE_FALLBACK.to_string());
        }

        Self::with_role(Role::Assistant, text)
    }

    fn with_role(role: Role, text: String) -> Self {
        Self {
            role,
            avatar: role.avatar().to_string(),
            text,
            created_at: Utc::now(),
        }
    }
}

/// Ordered chat history. Turns can only be appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn extend(&mut self, turns: impl IntoIterator<Item = ConversationTurn>) {
        self.turns.extend(turns);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.turns.iter().filter(|turn| turn.role == role).count()
    }

    pub fn last_from(&self, role: Role) -> Option<&ConversationTurn> {
        self.turns.iter().rev().find(|turn| turn.role == role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub id: Uuid,
    pub transcript: Transcript,
    pub cached_ingredients: Option<DetectionResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// User messages accepted so far, counted when a message starts rather
    /// than when its turns land in the transcript.
    #[serde(skip)]
    messages_started: usize,
}

impl Session {
    pub fn new() -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            transcript: Transcript::default(),
            cached_ingredients: None,
            created_at: now,
            updated_at: now,
            messages_started: 0,
        }
    }

    pub fn append(&mut self, turns: impl IntoIterator<Item = ConversationTurn>) {
        self.transcript.extend(turns);
        self.updated_at = Utc::now();
    }

    /// Claims the next user message and returns how many came before it.
    pub fn start_user_message(&mut self) -> usize {
        let prior = self.messages_started;
        self.messages_started += 1;
        prior
    }

    pub fn cache_ingredients(&mut self, ingredients: DetectionResult) {
        self.cached_ingredients = Some(ingredients);
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
