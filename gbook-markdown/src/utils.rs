//! Small string utilities shared by the preprocessor, the inline
//! formatter and the block parser.
use std::sync::LazyLock;

use log::error;
use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<[^>]*>").unwrap_or_else(|e| {
    error!("Failed to compile TAG_RE regex: {e}");
    never_matching_regex()
  })
});

static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[^\w\s-]").unwrap_or_else(|e| {
    error!("Failed to compile NON_WORD_RE regex: {e}");
    never_matching_regex()
  })
});

/// Regex that can never match anything, used as a fallback when a
/// pattern fails to compile so callers degrade instead of panicking.
#[must_use]
pub fn never_matching_regex() -> Regex {
  // Asserts something impossible: a character that is neither
  // whitespace nor non-whitespace.
  Regex::new(r"[^\s\S]").expect("Failed to compile never-matching regex")
}

/// Slugify heading text for use as an anchor id.
///
/// Embedded tags are stripped, non-word/non-space characters removed,
/// whitespace runs collapse to single hyphens, and the result is
/// lower-cased and trimmed of boundary hyphens. Deterministic and
/// idempotent: slugging a slug is a no-op.
#[must_use]
pub fn slugify(text: &str) -> String {
  let without_tags = TAG_RE.replace_all(text, "");
  let cleaned = NON_WORD_RE.replace_all(&without_tags, "");
  cleaned
    .split_whitespace()
    .collect::<Vec<_>>()
    .join("-")
    .to_lowercase()
    .trim_matches('-')
    .to_string()
}

/// Escape text for interpolation into HTML element content.
#[must_use]
pub fn escape_html(text: &str) -> String {
  html_escape::encode_text(text).into_owned()
}

/// Escape text for interpolation into a double-quoted HTML attribute.
#[must_use]
pub fn escape_attribute(text: &str) -> String {
  html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// Collapse all whitespace runs to single spaces and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}
