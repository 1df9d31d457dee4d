//! Front-matter and GitBook-extension preprocessor.
//!
//! Runs before the block parser: strips the leading metadata block,
//! deletes `content-ref` directives, and rewrites GitBook-emitted
//! `<figure>` HTML into the themed figure element the site styles.
use std::sync::LazyLock;

use log::error;
use regex::{Captures, Regex};

use crate::{
  inline::rewrite_asset_path,
  types::Frontmatter,
  utils::{escape_attribute, never_matching_regex},
};

static FRONTMATTER_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]*)\s*:(.*)$").unwrap_or_else(|e| {
    error!("Failed to compile FRONTMATTER_LINE_RE regex: {e}");
    never_matching_regex()
  })
});

static CONTENT_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)\{%\s*content-ref\s[^%]*?%\}.*?\{%\s*endcontent-ref\s*%\}")
    .unwrap_or_else(|e| {
      error!("Failed to compile CONTENT_REF_RE regex: {e}");
      never_matching_regex()
    })
});

static FIGURE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)<figure>.*?</figure>").unwrap_or_else(|e| {
    error!("Failed to compile FIGURE_RE regex: {e}");
    never_matching_regex()
  })
});

static IMG_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<img[^>]*?src="([^"]+)""#).unwrap_or_else(|e| {
    error!("Failed to compile IMG_SRC_RE regex: {e}");
    never_matching_regex()
  })
});

static IMG_ALT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<img[^>]*?alt="([^"]*)""#).unwrap_or_else(|e| {
    error!("Failed to compile IMG_ALT_RE regex: {e}");
    never_matching_regex()
  })
});

/// Output of [`preprocess`]: the content left for the block parser and
/// the extracted front-matter mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
  pub content:     String,
  pub frontmatter: Frontmatter,
}

/// Strip front-matter and rewrite GitBook-only markup.
///
/// Never fails: documents without front-matter come back unmodified
/// with an empty mapping, malformed front-matter lines contribute
/// nothing, and figure blocks without a recognizable inner image are
/// dropped silently.
#[must_use]
pub fn preprocess(raw: &str) -> Preprocessed {
  let (frontmatter, body) = split_frontmatter(raw);

  let without_refs = CONTENT_REF_RE.replace_all(body, "");

  let content = FIGURE_RE
    .replace_all(&without_refs, |caps: &Captures| rewrite_figure(&caps[0]))
    .into_owned();

  Preprocessed {
    content,
    frontmatter,
  }
}

/// Split a leading `---` delimited metadata block off the document.
///
/// The block must start at byte 0. Value parsing splits on the first
/// colon only. An unterminated block is treated as absent.
fn split_frontmatter(raw: &str) -> (Frontmatter, &str) {
  let mut map = Frontmatter::new();

  let Some(rest) = raw
    .strip_prefix("---\n")
    .or_else(|| raw.strip_prefix("---\r\n"))
  else {
    return (map, raw);
  };

  let mut offset = 0;
  for line in rest.split_inclusive('\n') {
    if line.trim_end() == "---" {
      return (map, &rest[offset + line.len()..]);
    }
    if let Some(caps) = FRONTMATTER_LINE_RE.captures(line.trim_end()) {
      map.insert(caps[1].to_string(), caps[2].trim().to_string());
    }
    offset += line.len();
  }

  // No closing delimiter; not front-matter after all.
  (Frontmatter::new(), raw)
}

/// Rewrite one GitBook `<figure>` block into the themed figure element,
/// carrying over the inner image's `src` and `alt`.
fn rewrite_figure(block: &str) -> String {
  let Some(src_caps) = IMG_SRC_RE.captures(block) else {
    return String::new();
  };

  let src = rewrite_asset_path(&src_caps[1]);
  let alt = IMG_ALT_RE
    .captures(block)
    .map_or_else(String::new, |caps| escape_attribute(&caps[1]));

  format!(
    "<figure class=\"content-figure\"><img src=\"{src}\" alt=\"{alt}\" \
     loading=\"lazy\"></figure>"
  )
}
