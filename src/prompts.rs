//! Prompt file helpers.

/// Built-in system instruction restricting the assistant to medical topics.
///
/// Sent with every request; user input never modifies it. A config
/// `system_prompt` / `system_prompt_file` replaces it wholesale.
pub const MEDICAL_SYSTEM_PROMPT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/medical_system_prompt.md"
));
