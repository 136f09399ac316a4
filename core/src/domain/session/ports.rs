use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::entities::DetectionResult,
    session::{
        entities::{ConversationTurn, Session},
        value_objects::{ChatExchange, ImageSubmission, SendMessageInput, SubmitImageInput},
    },
};

/// Storage for live chat sessions.
///
/// Appends and cache writes are applied atomically per session, so a
/// transcript read before a write is always a prefix of one read after it.
#[cfg_attr(test, mockall::automock)]
pub trait SessionRepository: Send + Sync {
    fn create_session(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn get_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<Option<Session>, CoreError>> + Send;

    fn append_turns(
        &self,
        session_id: Uuid,
        turns: Vec<ConversationTurn>,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn cache_ingredients(
        &self,
        session_id: Uuid,
        ingredients: DetectionResult,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    /// Counts a new user message in the same write as the lookup, returning
    /// the number of earlier messages and the session as it stood.
    fn start_user_message(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<(usize, Session), CoreError>> + Send;

    fn delete_session(&self, session_id: Uuid)
    -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait KitchenService: Send + Sync {
    fn create_session(&self) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn get_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn delete_session(&self, session_id: Uuid)
    -> impl Future<Output = Result<(), CoreError>> + Send;

    fn submit_image(
        &self,
        input: SubmitImageInput,
    ) -> impl Future<Output = Result<ImageSubmission, CoreError>> + Send;

    fn send_message(
        &self,
        input: SendMessageInput,
    ) -> impl Future<Output = Result<ChatExchange, CoreError>> + Send;

    /// Text of the latest assistant reply, for download.
    fn export_recipe(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
