use std::path::PathBuf;

use chrono::{DateTime, Utc};
use url::Url;
use uuid::{NoContext, Timestamp};

use crate::domain::{recipe::value_objects::Tweaks, session::policies::IngredientContextPolicy};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct KitchenConfig {
    pub detector: DetectorConfig,
    pub flow: FlowConfig,
    pub conversation: ConversationConfig,
}

#[derive(Clone, Debug)]
pub struct DetectorConfig {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub input_size: u32,
    pub confidence_threshold: f32,
}

/// Which conversational backend answers recipe prompts.
#[derive(Clone, Debug)]
pub enum FlowConfig {
    Remote(RemoteFlowConfig),
    Local(LocalFlowConfig),
}

#[derive(Clone, Debug)]
pub struct RemoteFlowConfig {
    pub base_url: Url,
    pub flow_id: String,
    pub api_key: Option<String>,
    pub tweaks: Tweaks,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LocalFlowConfig {
    pub command: String,
    pub args: Vec<String>,
    pub flow_path: PathBuf,
    pub tweaks: Tweaks,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ConversationConfig {
    pub ingredient_context: IngredientContextPolicy,
    pub image_prompt_template: String,
    pub chat_prompt_template: String,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            ingredient_context: IngredientContextPolicy::default(),
            image_prompt_template: DEFAULT_IMAGE_PROMPT_TEMPLATE.to_string(),
            chat_prompt_template: DEFAULT_CHAT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

pub const DEFAULT_IMAGE_PROMPT_TEMPLATE: &str = "{ingredients}";
pub const DEFAULT_CHAT_PROMPT_TEMPLATE: &str = "Ingredients: {ingredients}\n\n{query}";

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}
