//! Reply formatting: keyword emphasis and line-block splitting.
//!
//! The raw model reply is normalized (stray `**` markers removed), a fixed
//! vocabulary of medical terms is wrapped in `<b>` emphasis tags, and the
//! text is split into display blocks on newlines and bullet characters.

use anyhow::{Context, Result};
use regex::{NoExpand, Regex, RegexBuilder};

/// Bullet character treated as a line separator alongside `\n`.
const BULLET: char = '\u{2022}';

/// Medical terms emphasized in replies, in substitution order.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "Malaria",
    "Anopheles",
    "Fever",
    "Chills",
    "Sweating",
    "Headache",
    "Muscle pain",
    "Nausea",
    "Vomiting",
    "Fatigue",
    "Diagnosis",
    "Treatment",
    "Prevention",
];

struct HighlightRule {
    pattern: Regex,
    /// Canonical-cased keyword wrapped in emphasis tags.
    replacement: String,
}

/// Wraps whole-word keyword occurrences in `<b>` emphasis tags.
///
/// One case-insensitive, word-boundary pattern per keyword, compiled once.
/// Rules apply in list order over the already-rewritten text; the inserted
/// tags contain no word characters adjacent to keyword text, so later rules
/// cannot match inside earlier replacements.
pub struct Highlighter {
    rules: Vec<HighlightRule>,
}

impl Highlighter {
    /// Builds a highlighter for the given keywords.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let rules = keywords
            .iter()
            .map(|keyword| {
                let keyword = keyword.as_ref();
                let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("invalid highlight keyword: {keyword}"))?;
                Ok(HighlightRule {
                    pattern,
                    replacement: format!("<b>{keyword}</b>"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Splits a raw reply into cleaned display lines with emphasis applied.
    ///
    /// Newlines and bullets are equivalent separators; fragments are trimmed
    /// of leading/trailing bullets, hyphens, and spaces, and empty fragments
    /// are dropped.
    pub fn display_lines(&self, raw: &str) -> Vec<String> {
        let mut text = raw.replace("**", "");

        for rule in &self.rules {
            text = rule
                .pattern
                .replace_all(&text, NoExpand(&rule.replacement))
                .into_owned();
        }

        text.replace('\n', "\u{2022}")
            .split(BULLET)
            .map(|line| line.trim_matches(['-', BULLET, ' ']).to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Renders a raw reply as one concatenated markup string, one `<div>`
    /// block per non-empty line, each prefixed with `- `.
    pub fn format_for_display(&self, raw: &str) -> String {
        self.display_lines(raw)
            .iter()
            .map(|line| format!("<div style=\"margin-bottom:5px;\">- {line}</div>"))
            .collect()
    }
}

impl Default for Highlighter {
    /// Highlighter over [`DEFAULT_KEYWORDS`].
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS).expect("default keywords compile")
    }
}
