//! Types for the gbook-markdown public API.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Key-value mapping extracted from a leading `---` delimited block.
pub type Frontmatter = HashMap<String, String>;

/// Represents a heading in a Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading level (1-6).
  pub level: u8,

  /// Heading text with bold markers stripped.
  pub text: String,

  /// Slug derived from the heading text, used as the anchor id.
  /// Duplicate ids are not de-duplicated; anchor collisions are a
  /// known limitation of the dialect.
  pub id: String,
}

/// Result of parsing one Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseResult {
  /// Rendered HTML content fragment (no surrounding page shell).
  pub html: String,

  /// Headings in document order, for ToC and anchor generation.
  pub headings: Vec<Heading>,

  /// Front-matter mapping; empty when the document has none.
  pub frontmatter: Frontmatter,

  /// Lossy linear projection of the textual content, space-joined and
  /// whitespace-collapsed. Used only for search indexing.
  pub plain_text: String,
}

impl ParseResult {
  /// Document title: the `title` front-matter key when present,
  /// otherwise the first level-1 heading.
  #[must_use]
  pub fn title(&self) -> Option<&str> {
    self
      .frontmatter
      .get("title")
      .map(String::as_str)
      .or_else(|| {
        self
          .headings
          .iter()
          .find(|h| h.level == 1)
          .map(|h| h.text.as_str())
      })
  }
}
