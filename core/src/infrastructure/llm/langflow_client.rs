use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::domain::{
    common::{RemoteFlowConfig, entities::app_errors::CoreError},
    recipe::{
        entities::{FlowRequest, RecipeError},
        ports::RecipeBackend,
        value_objects::Tweaks,
    },
};

/// Location of the chat reply inside a Langflow run response.
const MESSAGE_POINTER: &str = "/outputs/0/outputs/0/results/message/text";

#[derive(Debug, Clone)]
pub struct LangflowHttpClient {
    base_url: Url,
    flow_id: String,
    api_key: Option<String>,
    tweaks: Tweaks,
    client: Client,
}

#[derive(Debug, Serialize)]
struct RunFlowRequest {
    input_value: String,
    input_type: &'static str,
    output_type: &'static str,
    #[serde(skip_serializing_if = "Tweaks::is_empty")]
    tweaks: Tweaks,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,
}

impl LangflowHttpClient {
    pub fn new(config: RemoteFlowConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CoreError::ConfigurationError(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            base_url: config.base_url,
            flow_id: config.flow_id,
            api_key: config.api_key,
            tweaks: config.tweaks,
            client,
        })
    }

    fn run_url(&self) -> String {
        format!(
            "{}/api/v1/run/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.flow_id
        )
    }

    async fn call_langflow_api(&self, request: RunFlowRequest) -> Result<Value, RecipeError> {
        let mut builder = self.client.post(self.run_url()).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("x-api-key", api_key);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!("Langflow API request failed: {}", e);
            if e.is_timeout() {
                RecipeError::Network(format!("request timed out: {}", e))
            } else {
                RecipeError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::debug!("Failed to read Langflow response: {}", e);
            RecipeError::Network(format!("failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            tracing::debug!("Langflow API error: {} - {}", status, body);
            return Err(RecipeError::Backend(format!("{} - {}", status, body)));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Failed to parse Langflow response: {}", e);
            RecipeError::Decode(e.to_string())
        })
    }
}

/// Pulls `outputs[0].outputs[0].results.message.text` out of a run response.
pub fn extract_message(response: &Value) -> Result<String, RecipeError> {
    response
        .pointer(MESSAGE_POINTER)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            tracing::debug!("No valid message found in response.");
            RecipeError::MissingMessage
        })
}

impl RecipeBackend for LangflowHttpClient {
    #[instrument(skip(self, request), fields(flow_id = %self.flow_id))]
    async fn run_flow(&self, request: FlowRequest) -> Result<String, RecipeError> {
        let response = self
            .call_langflow_api(RunFlowRequest {
                input_value: request.input_value,
                input_type: "chat",
                output_type: "chat",
                tweaks: self.tweaks.clone(),
                session_id: request.session_id,
            })
            .await?;

        extract_message(&response)
    }
}
