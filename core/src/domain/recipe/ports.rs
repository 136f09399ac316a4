use std::future::Future;

use crate::domain::recipe::{
    entities::{FlowRequest, RecipeError},
    value_objects::PromptRequest,
};

/// A conversational flow that turns a prompt into reply text.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeBackend: Send + Sync {
    fn run_flow(
        &self,
        request: FlowRequest,
    ) -> impl Future<Output = Result<String, RecipeError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RecipeService: Send + Sync {
    /// Single backend call; failures keep their cause.
    fn request_recipe(
        &self,
        prompt: PromptRequest,
        session_id: Option<String>,
    ) -> impl Future<Output = Result<String, RecipeError>> + Send;

    /// Same call, but failures collapse to the user-facing fallback text.
    fn request_recipe_or_fallback(
        &self,
        prompt: PromptRequest,
        session_id: Option<String>,
    ) -> impl Future<Output = String> + Send;
}
