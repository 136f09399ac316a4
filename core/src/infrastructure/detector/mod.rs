pub mod decode;
pub mod yolo;

pub use yolo::YoloIngredientDetector;
