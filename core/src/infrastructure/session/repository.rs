use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::entities::DetectionResult,
    session::{
        entities::{ConversationTurn, Session},
        ports::SessionRepository,
    },
};

/// Sessions live for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, session_id: Uuid, apply: F) -> Result<Session, CoreError>
    where
        F: FnOnce(&mut Session) + Send,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&session_id).ok_or(CoreError::NotFound)?;
        apply(session);

        Ok(session.clone())
    }
}

impl SessionRepository for InMemorySessionRepository {
    async fn create_session(&self, session: Session) -> Result<Session, CoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(CoreError::Invalid(format!(
                "session {} already exists",
                session.id
            )));
        }

        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Option<Session>, CoreError> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    #[instrument(skip(self, turns), fields(turns = turns.len()))]
    async fn append_turns(
        &self,
        session_id: Uuid,
        turns: Vec<ConversationTurn>,
    ) -> Result<Session, CoreError> {
        self.update(session_id, |session| session.append(turns))
            .await
    }

    async fn cache_ingredients(
        &self,
        session_id: Uuid,
        ingredients: DetectionResult,
    ) -> Result<Session, CoreError> {
        self.update(session_id, |session| session.cache_ingredients(ingredients))
            .await
    }

    async fn start_user_message(&self, session_id: Uuid) -> Result<(usize, Session), CoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&session_id).ok_or(CoreError::NotFound)?;
        let prior = session.start_user_message();

        Ok((prior, session.clone()))
    }

    async fn delete_session(&self, session_id: Uuid) -> Result<(), CoreError> {
        self.sessions
            .write()
            .await
            .remove(&session_id)
            .map(|_| ())
            .ok_or(CoreError::NotFound)
    }
}
