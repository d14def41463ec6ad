//! Terminal rendering of display markup.
//!
//! The formatter emits `<b>`/`</b>` emphasis tags; the renderer owns how
//! those reach the terminal. Interactive sessions get ANSI bold, piped
//! output gets the plain text with tags stripped.

use std::io::IsTerminal;

const BOLD_ON: &str = "\x1b[1m";
const BOLD_OFF: &str = "\x1b[0m";

/// How emphasis tags are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleMode {
    /// Emphasis as ANSI bold escapes.
    Ansi,
    /// Emphasis tags stripped.
    Plain,
}

/// Renders formatter markup for a terminal writer.
#[derive(Debug, Clone, Copy)]
pub struct MarkupRenderer {
    mode: StyleMode,
}

impl MarkupRenderer {
    pub fn new(mode: StyleMode) -> Self {
        Self { mode }
    }

    /// Picks ANSI when stdout is a terminal, plain otherwise.
    pub fn auto() -> Self {
        if std::io::stdout().is_terminal() {
            Self::new(StyleMode::Ansi)
        } else {
            Self::new(StyleMode::Plain)
        }
    }

    /// Rewrites emphasis tags in one display line.
    pub fn render_line(&self, line: &str) -> String {
        match self.mode {
            StyleMode::Ansi => line.replace("<b>", BOLD_ON).replace("</b>", BOLD_OFF),
            StyleMode::Plain => line.replace("<b>", "").replace("</b>", ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_mode_emits_bold_escapes() {
        let r = MarkupRenderer::new(StyleMode::Ansi);
        assert_eq!(
            r.render_line("take <b>Treatment</b> daily"),
            "take \x1b[1mTreatment\x1b[0m daily"
        );
    }

    #[test]
    fn test_plain_mode_strips_tags() {
        let r = MarkupRenderer::new(StyleMode::Plain);
        assert_eq!(r.render_line("<b>Fever</b> and rest"), "Fever and rest");
    }

    #[test]
    fn test_untagged_lines_pass_through() {
        let r = MarkupRenderer::new(StyleMode::Plain);
        assert_eq!(r.render_line("plain line"), "plain line");
    }
}
