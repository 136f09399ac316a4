use std::sync::Arc;

use image::imageops::FilterType;
use tracing::instrument;
use tract_onnx::prelude::{tract_ndarray::Array4, *};

use crate::{
    domain::{
        common::{DetectorConfig, entities::app_errors::CoreError},
        ingredient::{entities::DetectionResult, ports::IngredientDetector},
    },
    infrastructure::detector::decode::{decode_predictions, parse_labels},
};

type YoloPlan = TypedRunnableModel<TypedModel>;

/// YOLO model exported to ONNX, loaded once and shared between requests.
#[derive(Clone)]
pub struct YoloIngredientDetector {
    model: Arc<YoloModel>,
}

struct YoloModel {
    plan: YoloPlan,
    labels: Vec<String>,
    input_size: u32,
    confidence_threshold: f32,
}

impl YoloIngredientDetector {
    pub fn load(config: &DetectorConfig) -> Result<Self, CoreError> {
        let raw_labels = std::fs::read_to_string(&config.labels_path).map_err(|e| {
            CoreError::ConfigurationError(format!(
                "failed to read labels file {}: {}",
                config.labels_path.display(),
                e
            ))
        })?;
        let labels = parse_labels(&raw_labels)?;

        let size = config.input_size as usize;
        let plan = tract_onnx::onnx()
            .model_for_path(&config.model_path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, 3, size, size]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                tracing::error!("Failed to load detection model: {}", e);
                CoreError::ConfigurationError(format!(
                    "failed to load model {}: {}",
                    config.model_path.display(),
                    e
                ))
            })?;

        tracing::info!(
            model = %config.model_path.display(),
            classes = labels.len(),
            input_size = config.input_size,
            "Detection model loaded"
        );

        Ok(Self {
            model: Arc::new(YoloModel {
                plan,
                labels,
                input_size: config.input_size,
                confidence_threshold: config.confidence_threshold,
            }),
        })
    }
}

impl YoloModel {
    fn infer(&self, image_data: &[u8]) -> Result<DetectionResult, CoreError> {
        let input: Tensor = preprocess(image_data, self.input_size)?.into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| CoreError::DetectionError(format!("inference failed: {}", e)))?;

        let output = outputs
            .first()
            .ok_or_else(|| CoreError::DetectionError("model produced no output".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| CoreError::DetectionError(format!("unexpected output type: {}", e)))?;

        let shape = view.shape().to_vec();
        let values: Vec<f32> = view.iter().copied().collect();

        let labels =
            decode_predictions(&values, &shape, &self.labels, self.confidence_threshold)?;

        Ok(DetectionResult::new(labels))
    }
}

/// Decodes an image and lays it out as a `[1, 3, size, size]` RGB tensor in [0, 1].
fn preprocess(image_data: &[u8], size: u32) -> Result<Array4<f32>, CoreError> {
    let image = image::load_from_memory(image_data)
        .map_err(|e| CoreError::InvalidImage(e.to_string()))?;

    let resized = image
        .resize_exact(size, size, FilterType::Triangle)
        .to_rgb8();

    let side = size as usize;
    Ok(Array4::from_shape_fn((1, 3, side, side), |(_, c, y, x)| {
        resized.get_pixel(x as u32, y as u32).0[c] as f32 / 255.0
    }))
}

impl IngredientDetector for YoloIngredientDetector {
    #[instrument(skip(self, image_data), fields(image_bytes = image_data.len()))]
    async fn detect(&self, image_data: Vec<u8>) -> Result<DetectionResult, CoreError> {
        let model = Arc::clone(&self.model);

        tokio::task::spawn_blocking(move || model.infer(&image_data))
            .await
            .map_err(|e| {
                tracing::error!("Detection task failed: {}", e);
                CoreError::DetectionError(format!("detection task failed: {}", e))
            })?
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    use super::*;

    fn png(image: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn undecodable_bytes_are_invalid_image() {
        let result = preprocess(b"definitely not an image", 4);
        assert!(matches!(result, Err(CoreError::InvalidImage(_))));
    }

    #[test]
    fn tensor_is_channel_first_and_scaled() {
        let image = RgbImage::from_fn(4, 3, |_, _| Rgb([255, 0, 51]));

        let tensor = preprocess(&png(image), 2).unwrap();

        assert_eq!(tensor.shape(), &[1, 3, 2, 2]);
        for y in 0..2 {
            for x in 0..2 {
                assert!((tensor[[0, 0, y, x]] - 1.0).abs() < 1e-3);
                assert!(tensor[[0, 1, y, x]].abs() < 1e-3);
                assert!((tensor[[0, 2, y, x]] - 0.2).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn pixel_columns_map_to_tensor_columns() {
        // red on the left, blue on the right
        let image = RgbImage::from_fn(2, 2, |x, _| {
            if x == 0 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });

        let tensor = preprocess(&png(image), 2).unwrap();

        assert!(tensor[[0, 0, 0, 0]] > 0.9);
        assert!(tensor[[0, 2, 0, 0]] < 0.1);
        assert!(tensor[[0, 0, 1, 1]] < 0.1);
        assert!(tensor[[0, 2, 1, 1]] > 0.9);
    }
}
