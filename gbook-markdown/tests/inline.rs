#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
use gbook_markdown::format_inline;

/// Check if HTML output contains all expected substrings.
fn assert_html_contains(html: &str, expected: &[&str]) {
  for &needle in expected {
    assert!(
      html.contains(needle),
      "Expected HTML to contain '{needle}', but it did not.\nFull \
       HTML:\n{html}"
    );
  }
}

#[test]
fn code_span_escapes_contents() {
  let html = format_inline("use `a<b>` here");
  assert_html_contains(&html, &["<code>a&lt;b&gt;</code>"]);
}

#[test]
fn image_rewrites_gitbook_asset_path() {
  let html = format_inline("![logo](../../.gitbook/assets/logo.png)");
  assert_html_contains(&html, &[
    r#"<img src="/assets/images/logo.png" alt="logo" loading="lazy">"#,
  ]);
}

#[test]
fn image_alt_text_is_escaped() {
  let html = format_inline(r#"![a "b"](pic.png)"#);
  assert_html_contains(&html, &["alt=\"a &quot;b&quot;\""]);
}

#[test]
fn link_md_extension_rewritten() {
  let html = format_inline("[x](a/b.md)");
  assert_html_contains(&html, &[r#"<a href="a/b.html">x</a>"#]);
}

#[test]
fn link_readme_rewritten_to_index() {
  let html = format_inline("[x](a/README.md)");
  assert_html_contains(&html, &[r#"<a href="a/index.html">x</a>"#]);
}

#[test]
fn link_trailing_slash_gets_index() {
  let html = format_inline("[x](a/)");
  assert_html_contains(&html, &[r#"<a href="a/index.html">x</a>"#]);
}

#[test]
fn external_link_opens_new_tab() {
  let html = format_inline("[site](https://example.com)");
  assert_html_contains(&html, &[
    r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">site</a>"#,
  ]);
}

#[test]
fn link_text_is_recursively_formatted() {
  let html = format_inline("[**bold** link](a.md)");
  assert_html_contains(&html, &[
    r#"<a href="a.html"><strong>bold</strong> link</a>"#,
  ]);
}

#[test]
fn emphasis_precedence() {
  let html = format_inline("***both*** and **bold** and *italic*");
  assert_html_contains(&html, &[
    "<strong><em>both</em></strong>",
    "<strong>bold</strong>",
    "<em>italic</em>",
  ]);
}

#[test]
fn strikethrough() {
  let html = format_inline("~~gone~~");
  assert_html_contains(&html, &["<del>gone</del>"]);
}

#[test]
fn stray_asterisk_passes_through() {
  let html = format_inline("2 * 3 equals 6");
  assert_eq!(html, "2 * 3 equals 6");
}

#[test]
fn unbalanced_delimiters_never_panic() {
  for input in ["**open", "`tick", "~~half", "[text](", "![alt]("] {
    let html = format_inline(input);
    assert!(!html.is_empty());
  }
}

#[test]
fn emoji_shortcodes_substituted() {
  let html = format_inline("ship it :rocket:");
  assert_html_contains(&html, &["\u{1f680}"]);
  assert!(!html.contains(":rocket:"));
}
