use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::entities::app_errors::CoreError;

/// When remembered ingredients are prepended to chat prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IngredientContextPolicy {
    #[default]
    Always,
    FirstTurn,
    Never,
}

impl IngredientContextPolicy {
    /// `prior_user_turns` counts chat messages already in the transcript.
    pub fn includes_ingredients(&self, prior_user_turns: usize) -> bool {
        match self {
            IngredientContextPolicy::Always => true,
            IngredientContextPolicy::FirstTurn => prior_user_turns == 0,
            IngredientContextPolicy::Never => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientContextPolicy::Always => "always",
            IngredientContextPolicy::FirstTurn => "first-turn",
            IngredientContextPolicy::Never => "never",
        }
    }
}

impl FromStr for IngredientContextPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(IngredientContextPolicy::Always),
            "first-turn" => Ok(IngredientContextPolicy::FirstTurn),
            "never" => Ok(IngredientContextPolicy::Never),
            other => Err(CoreError::ConfigurationError(format!(
                "unknown ingredient context policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for IngredientContextPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_turn_only_includes_on_first_message() {
        let policy = IngredientContextPolicy::FirstTurn;
        assert!(policy.includes_ingredients(0));
        assert!(!policy.includes_ingredients(1));
        assert!(!policy.includes_ingredients(7));
    }

    #[test]
    fn parses_its_own_names() {
        for policy in [
            IngredientContextPolicy::Always,
            IngredientContextPolicy::FirstTurn,
            IngredientContextPolicy::Never,
        ] {
            assert_eq!(policy.as_str().parse::<IngredientContextPolicy>(), Ok(policy));
        }
        assert!("sometimes".parse::<IngredientContextPolicy>().is_err());
    }
}
