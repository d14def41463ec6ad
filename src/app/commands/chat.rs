//! Chat command handler.

use anyhow::{Context, Result};

use crate::chat;
use crate::config;

pub async fn run(config: &config::Config, model_override: Option<&str>) -> Result<()> {
    let mut config = config.clone();
    if let Some(model) = model_override {
        config.model = model.to_string();
    }

    chat::run_interactive_chat(&config)
        .await
        .context("interactive chat failed")?;

    Ok(())
}
