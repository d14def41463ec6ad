//! Interactive chat module for MedX.
//!
//! Provides a REPL-style chat interface that keeps an in-memory transcript.
//! Each turn blocks on one request to the inference endpoint; the reply is
//! formatted into emphasized line blocks before display.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::config::Config;
use crate::format::Highlighter;
use crate::providers::bytez::{BytezClient, BytezConfig};
use crate::renderer::MarkupRenderer;
use crate::transcript::Transcript;

const QUIT_COMMAND: &str = ":q";
const CLEAR_COMMAND: &str = ":clear";
const PROMPT_PREFIX: &str = "you> ";
const ASSISTANT_PREFIX: &str = "assistant>";
const THINKING_INDICATOR: &str = "thinking...";

/// Runs the interactive chat loop.
///
/// Reads user input from `input`, writes responses to `output`.
/// Exits on `:q` command or EOF.
pub async fn run_chat<R, W>(
    input: R,
    output: &mut W,
    client: &BytezClient,
    system_prompt: &str,
    highlighter: &Highlighter,
    renderer: MarkupRenderer,
    mut transcript: Transcript,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        // Handle quit command
        if trimmed == QUIT_COMMAND {
            writeln!(output, "Goodbye!")?;
            break;
        }

        // Reset the transcript to the greeting alone
        if trimmed == CLEAR_COMMAND {
            transcript.clear();
            writeln!(output, "Conversation cleared.")?;
            writeln!(output, "{ASSISTANT_PREFIX} {}", transcript.greeting())?;
            write!(output, "{PROMPT_PREFIX}")?;
            output.flush()?;
            continue;
        }

        // Skip empty lines
        if trimmed.is_empty() {
            write!(output, "{PROMPT_PREFIX}")?;
            output.flush()?;
            continue;
        }

        transcript.push_user(trimmed);

        // The interaction blocks on the remote call; show the indicator
        // until the reply lands.
        write!(output, "{THINKING_INDICATOR}")?;
        output.flush()?;

        match client.fetch_reply(trimmed, system_prompt).await {
            Ok(reply) => {
                writeln!(output, "\r{ASSISTANT_PREFIX}")?;
                for display_line in highlighter.display_lines(&reply) {
                    writeln!(output, "- {}", renderer.render_line(&display_line))?;
                }
                transcript.push_assistant(reply);
            }
            Err(e) => {
                writeln!(output, "\rError: {e:#}")?;
                // Remove the failed user message from the transcript
                transcript.pop();
            }
        }

        write!(output, "{PROMPT_PREFIX}")?;
        output.flush()?;
    }

    Ok(())
}

/// Runs the chat loop with stdin/stdout.
pub async fn run_interactive_chat(config: &Config) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    let bytez_config = BytezConfig::from_env(
        config.model.clone(),
        config.effective_bytez_base_url(),
        config.bytez_api_key.as_deref(),
    )?;
    let client = BytezClient::new(bytez_config);
    let system_prompt = config.effective_system_prompt()?;
    let highlighter = Highlighter::new(&config.highlight_keywords)?;
    let renderer = MarkupRenderer::auto();
    let transcript = Transcript::with_greeting(config.greeting.clone());

    writeln!(stdout, "MedX Chat ({QUIT_COMMAND} to quit, {CLEAR_COMMAND} to reset)")?;
    writeln!(stdout, "{ASSISTANT_PREFIX} {}", transcript.greeting())?;
    write!(stdout, "{PROMPT_PREFIX}")?;
    stdout.flush()?;

    run_chat(
        stdin.lock(),
        &mut stdout,
        &client,
        &system_prompt,
        &highlighter,
        renderer,
        transcript,
    )
    .await
}
