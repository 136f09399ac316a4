use crate::domain::{
    common::ConversationConfig, ingredient::ports::IngredientDetector,
    recipe::ports::RecipeBackend, session::ports::SessionRepository,
};

/// Wires the ports together; every domain service trait is implemented on it.
#[derive(Clone)]
pub struct Service<D, B, S>
where
    D: IngredientDetector,
    B: RecipeBackend,
    S: SessionRepository,
{
    pub(crate) detector: D,
    pub(crate) recipe_backend: B,
    pub(crate) session_repository: S,
    pub(crate) conversation: ConversationConfig,
}

impl<D, B, S> Service<D, B, S>
where
    D: IngredientDetector,
    B: RecipeBackend,
    S: SessionRepository,
{
    pub fn new(
        detector: D,
        recipe_backend: B,
        session_repository: S,
        conversation: ConversationConfig,
    ) -> Self {
        Self {
            detector,
            recipe_backend,
            session_repository,
            conversation,
        }
    }
}
