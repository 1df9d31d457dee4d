//! Inline formatter: turns one fragment of raw text into inline HTML.
//!
//! This is an ordered pipeline of pure regex substitutions. The order
//! is significant and fixed: code spans are emitted first so their
//! escaped contents sit inside `<code>` before the link and emphasis
//! rules scan the string, images before links so `![..](..)` is never
//! half-matched as a link, and the emphasis rules run longest marker
//! first.
use std::sync::LazyLock;

use log::error;
use regex::{Captures, Regex};

use crate::utils::{escape_attribute, escape_html, never_matching_regex};

static CODE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"`([^`\n]+)`").unwrap_or_else(|e| {
    error!("Failed to compile CODE_SPAN_RE regex: {e}");
    never_matching_regex()
  })
});

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap_or_else(|e| {
    error!("Failed to compile IMAGE_RE regex: {e}");
    never_matching_regex()
  })
});

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap_or_else(|e| {
    error!("Failed to compile LINK_RE regex: {e}");
    never_matching_regex()
  })
});

static BOLD_ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*\*\*([^*]+)\*\*\*").unwrap_or_else(|e| {
    error!("Failed to compile BOLD_ITALIC_RE regex: {e}");
    never_matching_regex()
  })
});

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*\*([^*]+)\*\*").unwrap_or_else(|e| {
    error!("Failed to compile BOLD_RE regex: {e}");
    never_matching_regex()
  })
});

static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*([^*]+)\*").unwrap_or_else(|e| {
    error!("Failed to compile ITALIC_RE regex: {e}");
    never_matching_regex()
  })
});

static STRIKETHROUGH_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"~~([^~]+)~~").unwrap_or_else(|e| {
    error!("Failed to compile STRIKETHROUGH_RE regex: {e}");
    never_matching_regex()
  })
});

/// Fixed emoji shortcode table. Applied as plain literal replacement
/// after every other rule, so shortcode text inside already-emitted
/// tags is substituted too. That quirk is part of the dialect.
const EMOJI: &[(&str, &str)] = &[
  (":smile:", "\u{1f604}"),
  (":warning:", "\u{26a0}\u{fe0f}"),
  (":bulb:", "\u{1f4a1}"),
  (":rocket:", "\u{1f680}"),
  (":white_check_mark:", "\u{2705}"),
  (":x:", "\u{274c}"),
  (":tada:", "\u{1f389}"),
  (":fire:", "\u{1f525}"),
  (":memo:", "\u{1f4dd}"),
  (":eyes:", "\u{1f440}"),
];

/// Rewrite a GitBook asset-relative image path to a site-absolute one.
///
/// GitBook exports reference images as `../.gitbook/assets/<file>`
/// (with any number of leading `../`); those all land under
/// `/assets/images/` in the generated site.
#[must_use]
pub fn rewrite_asset_path(src: &str) -> String {
  src.find(".gitbook/assets/").map_or_else(
    || src.to_string(),
    |idx| format!("/assets/images/{}", &src[idx + ".gitbook/assets/".len()..]),
  )
}

/// Rewrite a link target for the generated site.
///
/// Trailing `.md` becomes `.html`, a trailing `/` gains `index.html`,
/// and `README.html` collapses to `index.html` (applied after the
/// extension rewrite so `README.md` links resolve too).
#[must_use]
pub fn rewrite_href(href: &str) -> String {
  let mut out = if let Some(stem) = href.strip_suffix(".md") {
    format!("{stem}.html")
  } else if href.ends_with('/') {
    format!("{href}index.html")
  } else {
    href.to_string()
  };

  if let Some(dir) = out.strip_suffix("README.html") {
    out = format!("{dir}index.html");
  }

  out
}

fn is_external(href: &str) -> bool {
  href.starts_with("http://") || href.starts_with("https://")
}

/// Format one fragment of raw text into inline HTML.
///
/// Pure and infallible: unbalanced delimiters pass through as literal
/// text. Link text is recursively formatted, so emphasis nested inside
/// link text renders.
#[must_use]
pub fn format_inline(text: &str) -> String {
  let mut out = CODE_SPAN_RE
    .replace_all(text, |caps: &Captures| {
      format!("<code>{}</code>", escape_html(&caps[1]))
    })
    .into_owned();

  out = IMAGE_RE
    .replace_all(&out, |caps: &Captures| {
      let alt = escape_attribute(&caps[1]);
      let src = rewrite_asset_path(&caps[2]);
      format!("<img src=\"{src}\" alt=\"{alt}\" loading=\"lazy\">")
    })
    .into_owned();

  out = LINK_RE
    .replace_all(&out, |caps: &Captures| {
      let label = format_inline(&caps[1]);
      let href = rewrite_href(&caps[2]);
      if is_external(&href) {
        format!(
          "<a href=\"{href}\" target=\"_blank\" rel=\"noopener \
           noreferrer\">{label}</a>"
        )
      } else {
        format!("<a href=\"{href}\">{label}</a>")
      }
    })
    .into_owned();

  out = BOLD_ITALIC_RE
    .replace_all(&out, "<strong><em>$1</em></strong>")
    .into_owned();
  out = BOLD_RE.replace_all(&out, "<strong>$1</strong>").into_owned();
  out = ITALIC_RE.replace_all(&out, "<em>$1</em>").into_owned();
  out = STRIKETHROUGH_RE
    .replace_all(&out, "<del>$1</del>")
    .into_owned();

  for (shortcode, glyph) in EMOJI {
    if out.contains(shortcode) {
      out = out.replace(shortcode, glyph);
    }
  }

  out
}
