use tracing::instrument;

use crate::domain::{
    common::services::Service,
    ingredient::ports::IngredientDetector,
    recipe::{
        entities::{FlowRequest, RecipeError},
        ports::{RecipeBackend, RecipeService},
        value_objects::PromptRequest,
    },
    session::ports::SessionRepository,
};

impl<D, B, S> RecipeService for Service<D, B, S>
where
    D: IngredientDetector,
    B: RecipeBackend,
    S: SessionRepository,
{
    #[instrument(skip(self, prompt))]
    async fn request_recipe(
        &self,
        prompt: PromptRequest,
        session_id: Option<String>,
    ) -> Result<String, RecipeError> {
        let input_value = prompt.render(&self.conversation);

        let mut request = FlowRequest::new(input_value);
        if let Some(session_id) = session_id {
            request = request.with_session(session_id);
        }

        let reply = self.recipe_backend.run_flow(request).await?;
        let reply = reply.trim();

        if reply.is_empty() {
            return Err(RecipeError::MissingMessage);
        }

        Ok(reply.to_string())
    }

    async fn request_recipe_or_fallback(
        &self,
        prompt: PromptRequest,
        session_id: Option<String>,
    ) -> String {
        match self.request_recipe(prompt, session_id).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(kind = ?e.kind(), "recipe request failed: {}", e);
                e.fallback_text().to_string()
            }
        }
    }
}
