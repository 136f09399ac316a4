use crate::domain::common::entities::app_errors::CoreError;

/// Box coordinates (cx, cy, w, h) precede the class scores in every prediction.
const BOX_CHANNELS: usize = 4;

/// Parses a class-names file: one label per line, blank lines and `#` comments ignored.
pub fn parse_labels(raw: &str) -> Result<Vec<String>, CoreError> {
    let labels: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if labels.is_empty() {
        return Err(CoreError::ConfigurationError(
            "labels file contains no class names".to_string(),
        ));
    }

    Ok(labels)
}

/// Collects the label of every prediction whose best class score reaches
/// `threshold`.
///
/// Accepts the YOLOv8 export layout `[1, 4 + classes, anchors]` as well as
/// the transposed `[1, anchors, 4 + classes]`. Duplicates are left in; the
/// caller deduplicates.
pub fn decode_predictions(
    values: &[f32],
    shape: &[usize],
    labels: &[String],
    threshold: f32,
) -> Result<Vec<String>, CoreError> {
    let channels = BOX_CHANNELS + labels.len();

    let [batch, rows, cols] = shape else {
        return Err(CoreError::DetectionError(format!(
            "unexpected output rank {} (shape {:?})",
            shape.len(),
            shape
        )));
    };

    if *batch != 1 || values.len() != batch * rows * cols {
        return Err(CoreError::DetectionError(format!(
            "output of shape {:?} holds {} values",
            shape,
            values.len()
        )));
    }

    let (anchors, channels_first) = if *rows == channels {
        (*cols, true)
    } else if *cols == channels {
        (*rows, false)
    } else {
        return Err(CoreError::DetectionError(format!(
            "output shape {:?} does not fit {} classes",
            shape,
            labels.len()
        )));
    };

    let score_at = |anchor: usize, ch: usize| {
        if channels_first {
            values[ch * anchors + anchor]
        } else {
            values[anchor * channels + ch]
        }
    };

    let mut found = Vec::new();
    for anchor in 0..anchors {
        let best = (0..labels.len())
            .map(|class| (class, score_at(anchor, BOX_CHANNELS + class)))
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((class, score)) = best
            && score >= threshold
        {
            found.push(labels[class].clone());
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["egg".to_string(), "tomato".to_string()]
    }

    /// Builds a channels-first tensor from per-anchor `[egg, tomato]` scores.
    fn channels_first(scores: &[[f32; 2]]) -> (Vec<f32>, Vec<usize>) {
        let anchors = scores.len();
        let mut values = vec![0.0; (BOX_CHANNELS + 2) * anchors];
        for (anchor, pair) in scores.iter().enumerate() {
            for (class, score) in pair.iter().enumerate() {
                values[(BOX_CHANNELS + class) * anchors + anchor] = *score;
            }
        }
        (values, vec![1, BOX_CHANNELS + 2, anchors])
    }

    #[test]
    fn keeps_predictions_at_or_above_threshold() {
        let (values, shape) = channels_first(&[[0.9, 0.1], [0.2, 0.25], [0.1, 0.05]]);

        let found = decode_predictions(&values, &shape, &labels(), 0.25).unwrap();

        assert_eq!(found, vec!["egg".to_string(), "tomato".to_string()]);
    }

    #[test]
    fn nothing_above_threshold_yields_empty() {
        let (values, shape) = channels_first(&[[0.1, 0.2], [0.05, 0.0]]);
        let found = decode_predictions(&values, &shape, &labels(), 0.5).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn accepts_transposed_layout() {
        // anchors = 2, channels = 6, row-major per anchor
        let values = vec![
            0.0, 0.0, 0.0, 0.0, 0.1, 0.8, //
            0.0, 0.0, 0.0, 0.0, 0.7, 0.3,
        ];
        let found = decode_predictions(&values, &[1, 2, 6], &labels(), 0.5).unwrap();
        assert_eq!(found, vec!["tomato".to_string(), "egg".to_string()]);
    }

    #[test]
    fn rejects_mismatched_shapes() {
        let values = vec![0.0; 10];
        assert!(decode_predictions(&values, &[1, 5, 2], &labels(), 0.5).is_err());
        assert!(decode_predictions(&values, &[10], &labels(), 0.5).is_err());
        assert!(decode_predictions(&values, &[1, 6, 3], &labels(), 0.5).is_err());
    }

    #[test]
    fn parse_labels_skips_blanks_and_comments() {
        let parsed = parse_labels("# fine-tuned classes\negg\n\n tomato \n").unwrap();
        assert_eq!(parsed, labels());
        assert!(parse_labels("\n# nothing\n").is_err());
    }
}
