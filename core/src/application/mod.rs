use crate::{
    domain::common::{KitchenConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        detector::YoloIngredientDetector, llm::FlowBackend, session::InMemorySessionRepository,
    },
};

pub type AiKitchenService =
    Service<YoloIngredientDetector, FlowBackend, InMemorySessionRepository>;

/// Loads the detection model and connects the configured flow backend.
pub async fn create_service(config: KitchenConfig) -> Result<AiKitchenService, CoreError> {
    let detector_config = config.detector.clone();
    let detector = tokio::task::spawn_blocking(move || {
        YoloIngredientDetector::load(&detector_config)
    })
    .await
    .map_err(|e| {
        tracing::error!("Model loading task failed: {}", e);
        CoreError::InternalServerError
    })??;

    let recipe_backend = FlowBackend::from_config(&config.flow)?;
    let session_repository = InMemorySessionRepository::new();

    Ok(Service::new(
        detector,
        recipe_backend,
        session_repository,
        config.conversation,
    ))
}
