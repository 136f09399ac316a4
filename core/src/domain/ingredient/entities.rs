use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const NO_INGREDIENTS_DETECTED: &str = "No ingredients detected";

/// Distinct ingredient labels recognised in one image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DetectionResult {
    #[schema(value_type = Vec<String>)]
    labels: BTreeSet<String>,
}

impl DetectionResult {
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(Into::<String>::into)
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Comma-joined labels, or the "nothing found" sentinel.
    pub fn to_prompt_text(&self) -> String {
        if self.labels.is_empty() {
            return NO_INGREDIENTS_DETECTED.to_string();
        }

        self.labels().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_detection_yields_sentinel() {
        let result = DetectionResult::default();
        assert_eq!(result.to_prompt_text(), "No ingredients detected");
    }

    #[test]
    fn repeated_labels_appear_once() {
        let result = DetectionResult::new(["tomato", "egg", "tomato", "egg", "basil"]);

        let text = result.to_prompt_text();
        let parts: Vec<&str> = text.split(", ").collect();

        assert_eq!(parts.len(), 3);
        for label in ["tomato", "egg", "basil"] {
            assert_eq!(parts.iter().filter(|p| **p == label).count(), 1);
        }
    }

    #[test]
    fn blank_labels_are_dropped() {
        let result = DetectionResult::new(["", "  ", " onion "]);
        assert_eq!(result.len(), 1);
        assert!(result.contains("onion"));
    }
}
