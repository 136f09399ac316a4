use std::sync::Arc;

use aikitchen_core::application::AiKitchenService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: AiKitchenService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: AiKitchenService) -> Self {
        Self { args, service }
    }
}
