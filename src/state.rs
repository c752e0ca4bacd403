// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::openai::OpenAiClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub openai: OpenAiClient,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            openai: OpenAiClient::new(config)?,
        })
    }
}
