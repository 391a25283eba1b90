// src/state.rs
use std::sync::Arc;

use crate::services::assistant::DeductionAssistant;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub assistant: DeductionAssistant,
}

impl AppState {
    pub fn new(assistant: DeductionAssistant) -> Self {
        Self { assistant }
    }
}
