use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    common::{ConversationConfig, entities::app_errors::CoreError},
    ingredient::entities::DetectionResult,
};

/// Per-component parameter overrides applied to a flow before it runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tweaks(Map<String, Value>);

impl Tweaks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object of `component id -> { param: value }`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_str(raw)
            .map_err(|e| CoreError::ConfigurationError(format!("invalid tweaks JSON: {}", e)))?;

        let Value::Object(components) = value else {
            return Err(CoreError::ConfigurationError(
                "tweaks must be a JSON object".to_string(),
            ));
        };

        if let Some((component, _)) = components.iter().find(|(_, v)| !v.is_object()) {
            return Err(CoreError::ConfigurationError(format!(
                "tweaks for component '{}' must be a JSON object",
                component
            )));
        }

        Ok(Self(components))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Text sent to the conversational backend, before templating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRequest {
    /// Freshly detected ingredients, sent as soon as an image arrives.
    Ingredients(DetectionResult),
    /// A chat message, optionally combined with remembered ingredients.
    Chat {
        query: String,
        ingredients: Option<DetectionResult>,
    },
    /// Caller-supplied prompt, passed through untouched.
    Text(String),
}

impl PromptRequest {
    pub fn render(&self, config: &ConversationConfig) -> String {
        match self {
            PromptRequest::Ingredients(ingredients) => config
                .image_prompt_template
                .replace("{ingredients}", &ingredients.to_prompt_text()),
            PromptRequest::Chat {
                query,
                ingredients: Some(ingredients),
            } => config
                .chat_prompt_template
                .replace("{ingredients}", &ingredients.to_prompt_text())
                .replace("{query}", query),
            PromptRequest::Chat {
                query,
                ingredients: None,
            } => query.clone(),
            PromptRequest::Text(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_prompt_is_bare_ingredient_list_by_default() {
        let prompt = PromptRequest::Ingredients(DetectionResult::new(["tomato", "egg"]));
        assert_eq!(prompt.render(&ConversationConfig::default()), "egg, tomato");
    }

    #[test]
    fn image_prompt_without_detections_uses_sentinel() {
        let prompt = PromptRequest::Ingredients(DetectionResult::default());
        assert_eq!(
            prompt.render(&ConversationConfig::default()),
            "No ingredients detected"
        );
    }

    #[test]
    fn chat_prompt_prefixes_remembered_ingredients() {
        let prompt = PromptRequest::Chat {
            query: "what else can I add?".to_string(),
            ingredients: Some(DetectionResult::new(["egg", "tomato"])),
        };

        let rendered = prompt.render(&ConversationConfig::default());

        assert!(rendered.contains("egg, tomato"));
        assert!(rendered.ends_with("what else can I add?"));
    }

    #[test]
    fn chat_prompt_without_ingredients_is_the_query() {
        let prompt = PromptRequest::Chat {
            query: "a quick dessert?".to_string(),
            ingredients: None,
        };
        assert_eq!(
            prompt.render(&ConversationConfig::default()),
            "a quick dessert?"
        );
    }

    #[test]
    fn custom_templates_are_honoured() {
        let config = ConversationConfig {
            image_prompt_template: "Suggest a recipe using: {ingredients}".to_string(),
            ..ConversationConfig::default()
        };
        let prompt = PromptRequest::Ingredients(DetectionResult::new(["rice"]));
        assert_eq!(prompt.render(&config), "Suggest a recipe using: rice");
    }

    #[test]
    fn tweaks_parse_accepts_component_objects() {
        let tweaks = Tweaks::parse(r#"{"ChatInput-jIiOJ": {}, "OpenAIModel-2w2an": {"temperature": 0.2}}"#)
            .unwrap();
        assert_eq!(tweaks.as_map().len(), 2);
    }

    #[test]
    fn tweaks_parse_rejects_non_objects() {
        assert!(Tweaks::parse("[1, 2]").is_err());
        assert!(Tweaks::parse(r#"{"Prompt-ScINz": 3}"#).is_err());
        assert!(Tweaks::parse("not json").is_err());
    }

    #[test]
    fn blank_tweaks_are_empty() {
        assert!(Tweaks::parse("  ").unwrap().is_empty());
    }
}
