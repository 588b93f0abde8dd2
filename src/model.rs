//! Parse result model.

use serde::{Deserialize, Serialize};

/// Separator placed between paragraphs in [`DocxParseResult::text`].
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Warning recorded when a document yields no paragraphs.
pub const NO_TEXT_WARNING: &str = "no text content found";

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocxParseResult {
    /// All paragraphs joined by a blank line
    pub text: String,
    /// Non-empty paragraphs in document order
    pub paragraphs: Vec<String>,
    /// `data:<mime>;base64,<payload>` URIs in archive order
    pub images: Vec<String>,
    /// Non-fatal diagnostics
    pub warnings: Vec<String>,
}

impl DocxParseResult {
    /// Assemble a result from extracted paragraphs and images.
    pub fn new(paragraphs: Vec<String>, images: Vec<String>, mut warnings: Vec<String>) -> Self {
        if paragraphs.is_empty() {
            log::warn!("{}", NO_TEXT_WARNING);
            warnings.push(NO_TEXT_WARNING.to_string());
        }

        Self {
            text: paragraphs.join(PARAGRAPH_SEPARATOR),
            paragraphs,
            images,
            warnings,
        }
    }

    /// The joined document text.
    pub fn plain_text(&self) -> &str {
        &self.text
    }

    /// Check if no text was extracted.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Count whitespace-separated words in the text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Check if any warnings were recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
