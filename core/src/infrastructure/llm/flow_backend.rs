use crate::{
    domain::{
        common::{FlowConfig, entities::app_errors::CoreError},
        recipe::{
            entities::{FlowRequest, RecipeError},
            ports::RecipeBackend,
        },
    },
    infrastructure::llm::{LangflowHttpClient, LocalFlowRunner},
};

/// Conversational backend chosen at startup from [`FlowConfig`].
#[derive(Debug, Clone)]
pub enum FlowBackend {
    Remote(LangflowHttpClient),
    Local(LocalFlowRunner),
}

impl FlowBackend {
    pub fn from_config(config: &FlowConfig) -> Result<Self, CoreError> {
        let backend = match config {
            FlowConfig::Remote(remote) => FlowBackend::Remote(LangflowHttpClient::new(remote.clone())?),
            FlowConfig::Local(local) => FlowBackend::Local(LocalFlowRunner::new(local.clone())),
        };

        Ok(backend)
    }
}

impl RecipeBackend for FlowBackend {
    async fn run_flow(&self, request: FlowRequest) -> Result<String, RecipeError> {
        match self {
            FlowBackend::Remote(client) => client.run_flow(request).await,
            FlowBackend::Local(runner) => runner.run_flow(request).await,
        }
    }
}
