//! Ask command handler: one question, one formatted reply.

use anyhow::{Context, Result};

use crate::config;
use crate::format::Highlighter;
use crate::providers::bytez::{BytezClient, BytezConfig};
use crate::renderer::MarkupRenderer;

pub async fn run(
    prompt: &str,
    config: &config::Config,
    model_override: Option<&str>,
    raw: bool,
) -> Result<()> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        anyhow::bail!("No prompt provided");
    }

    let model = model_override.unwrap_or(&config.model).to_string();
    let bytez_config = BytezConfig::from_env(
        model,
        config.effective_bytez_base_url(),
        config.bytez_api_key.as_deref(),
    )?;
    let client = BytezClient::new(bytez_config);
    let system_prompt = config.effective_system_prompt()?;

    let reply = client
        .fetch_reply(prompt, &system_prompt)
        .await
        .context("fetch reply")?;

    if raw {
        println!("{reply}");
        return Ok(());
    }

    let highlighter = Highlighter::new(&config.highlight_keywords)?;
    let renderer = MarkupRenderer::auto();
    for line in highlighter.display_lines(&reply) {
        println!("- {}", renderer.render_line(&line));
    }

    Ok(())
}
