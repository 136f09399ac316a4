use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    ingredient::{
        entities::DetectionResult,
        ports::{IngredientDetector, IngredientService},
    },
    recipe::ports::RecipeBackend,
    session::ports::SessionRepository,
};

impl<D, B, S> IngredientService for Service<D, B, S>
where
    D: IngredientDetector,
    B: RecipeBackend,
    S: SessionRepository,
{
    #[instrument(skip(self, image_data), fields(image_bytes = image_data.len()))]
    async fn detect_ingredients(&self, image_data: Vec<u8>) -> Result<DetectionResult, CoreError> {
        if image_data.is_empty() {
            return Err(CoreError::InvalidImage("image is empty".to_string()));
        }

        let result = self.detector.detect(image_data).await?;
        tracing::debug!(ingredients = result.len(), "ingredients detected");

        Ok(result)
    }
}
