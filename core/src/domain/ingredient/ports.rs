use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, ingredient::entities::DetectionResult,
};

/// Recognises ingredients in an encoded image (JPEG, PNG, ...).
#[cfg_attr(test, mockall::automock)]
pub trait IngredientDetector: Send + Sync {
    fn detect(
        &self,
        image_data: Vec<u8>,
    ) -> impl Future<Output = Result<DetectionResult, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait IngredientService: Send + Sync {
    fn detect_ingredients(
        &self,
        image_data: Vec<u8>,
    ) -> impl Future<Output = Result<DetectionResult, CoreError>> + Send;
}
