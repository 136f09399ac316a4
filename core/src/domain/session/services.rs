use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    ingredient::ports::{IngredientDetector, IngredientService},
    recipe::{
        ports::{RecipeBackend, RecipeService},
        value_objects::PromptRequest,
    },
    session::{
        entities::{ConversationTurn, Role, Session},
        ports::{KitchenService, SessionRepository},
        value_objects::{ChatExchange, ImageSubmission, SendMessageInput, SubmitImageInput},
    },
};

impl<D, B, S> Service<D, B, S>
where
    D: IngredientDetector,
    B: RecipeBackend,
    S: SessionRepository,
{
    async fn require_session(&self, session_id: Uuid) -> Result<Session, CoreError> {
        self.session_repository
            .get_session(session_id)
            .await?
            .ok_or(CoreError::NotFound)
    }
}

impl<D, B, S> KitchenService for Service<D, B, S>
where
    D: IngredientDetector,
    B: RecipeBackend,
    S: SessionRepository,
{
    async fn create_session(&self) -> Result<Session, CoreError> {
        let session = self.session_repository.create_session(Session::new()).await?;
        tracing::info!(session_id = %session.id, "session created");

        Ok(session)
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Session, CoreError> {
        self.require_session(session_id).await
    }

    async fn delete_session(&self, session_id: Uuid) -> Result<(), CoreError> {
        self.require_session(session_id).await?;
        self.session_repository.delete_session(session_id).await?;
        tracing::info!(session_id = %session_id, "session deleted");

        Ok(())
    }

    #[instrument(skip(self, input), fields(session_id = %input.session_id))]
    async fn submit_image(&self, input: SubmitImageInput) -> Result<ImageSubmission, CoreError> {
        let session_id = input.session_id;
        self.require_session(session_id).await?;

        // 1. Detect; a detector fault aborts the request before anything is stored
        let ingredients = self.detect_ingredients(input.image_data).await?;

        // 2. Remember the ingredients for later chat turns
        self.session_repository
            .cache_ingredients(session_id, ingredients.clone())
            .await?;

        // 3. Ask for a recipe straight away
        let reply = self
            .request_recipe_or_fallback(
                PromptRequest::Ingredients(ingredients.clone()),
                Some(session_id.to_string()),
            )
            .await;

        let reply = ConversationTurn::assistant(reply);
        self.session_repository
            .append_turns(session_id, vec![reply.clone()])
            .await?;

        Ok(ImageSubmission { ingredients, reply })
    }

    #[instrument(skip(self, input), fields(session_id = %input.session_id))]
    async fn send_message(&self, input: SendMessageInput) -> Result<ChatExchange, CoreError> {
        let query = input.text.trim().to_string();
        if query.is_empty() {
            return Err(CoreError::Invalid(
                "message text must not be empty".to_string(),
            ));
        }

        // Claimed up front so concurrent first messages see distinct counts
        let (prior_messages, session) = self
            .session_repository
            .start_user_message(input.session_id)
            .await?;

        let ingredients = session.cached_ingredients.filter(|_| {
            self.conversation
                .ingredient_context
                .includes_ingredients(prior_messages)
        });

        let reply = self
            .request_recipe_or_fallback(
                PromptRequest::Chat {
                    query: query.clone(),
                    ingredients,
                },
                Some(session.id.to_string()),
            )
            .await;

        let user = ConversationTurn::user(query);
        let assistant = ConversationTurn::assistant(reply);

        self.session_repository
            .append_turns(session.id, vec![user.clone(), assistant.clone()])
            .await?;

        Ok(ChatExchange { user, assistant })
    }

    async fn export_recipe(&self, session_id: Uuid) -> Result<String, CoreError> {
        let session = self.require_session(session_id).await?;

        session
            .transcript
            .last_from(Role::Assistant)
            .map(|turn| turn.text.clone())
            .ok_or(CoreError::NotFound)
    }
}
