#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
use gbook_markdown::{parse, slugify};

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
fn headings_collected_in_document_order() {
  let result = parse("# One\n\ntext\n\n## Two\n\n### Three\n");

  let levels: Vec<u8> = result.headings.iter().map(|h| h.level).collect();
  let texts: Vec<&str> =
    result.headings.iter().map(|h| h.text.as_str()).collect();
  assert_eq!(levels, vec![1, 2, 3]);
  assert_eq!(texts, vec!["One", "Two", "Three"]);
}

#[test]
fn no_heading_lines_means_no_headings() {
  let result = parse("just a paragraph\n\nand another\n");
  assert!(result.headings.is_empty());
}

#[test]
fn heading_ids_are_slugs_and_slugging_is_idempotent() {
  let result = parse("## Getting Started: A Guide\n");

  let heading = &result.headings[0];
  assert_eq!(heading.id, "getting-started-a-guide");
  assert_eq!(slugify(&heading.id), heading.id);
}

#[test]
fn bold_markers_stripped_from_heading_record_but_rendered_in_html() {
  let result = parse("## The **Big** One\n");

  let heading = &result.headings[0];
  assert_eq!(heading.text, "The Big One");
  assert_eq!(heading.id, "the-big-one");
  assert_html_contains(&result.html, &[
    r##"<h2 id="the-big-one"><a class="header-anchor" href="#the-big-one">#</a>"##,
    "<strong>Big</strong>",
  ]);
}

#[test]
fn code_fence_round_trip() {
  let result = parse("```rust\nlet a = 1 < 2;\n```\n");

  assert_eq!(result.html.matches("<pre>").count(), 1);
  assert_html_contains(&result.html, &[
    r#"<span class="code-block-lang">rust</span>"#,
    "<pre><code>let a = 1 &lt; 2;</code></pre>",
    r#"<button class="code-copy""#,
  ]);
}

#[test]
fn code_fence_without_language_labels_text() {
  let result = parse("```\nplain\n```\n");
  assert_html_contains(&result.html, &[
    r#"<span class="code-block-lang">text</span>"#,
  ]);
}

#[test]
fn fence_bypasses_all_other_rules() {
  let result = parse("```\n# not a heading\n- not a list\n```\n");

  assert!(result.headings.is_empty());
  assert!(!result.html.contains("<ul>"));
  assert_html_contains(&result.html, &["# not a heading"]);
}

#[test]
fn table_with_separator_row() {
  let result = parse("| a | b |\n| --- | --- |\n| 1 | 2 |\n");

  assert_eq!(result.html.matches("<th>").count(), 2);
  assert_eq!(result.html.matches("<td>").count(), 2);
  assert_html_contains(&result.html, &[
    "<th>a</th>",
    "<th>b</th>",
    "<td>1</td>",
    "<td>2</td>",
  ]);
  assert!(!result.html.contains("<td>---</td>"));
}

#[test]
fn table_without_separator_row() {
  let result = parse("| a | b |\n| 1 | 2 |\n");

  assert_eq!(result.html.matches("<th>").count(), 2);
  assert_eq!(result.html.matches("<td>").count(), 2);
}

#[test]
fn list_type_switch_produces_two_lists() {
  let result = parse("- a\n1. b\n");

  assert_eq!(result.html.matches("<ul>").count(), 1);
  assert_eq!(result.html.matches("<ol>").count(), 1);
  assert_html_contains(&result.html, &["<li>a</li>", "<li>b</li>"]);
  assert!(
    result.html.find("</ul>").unwrap() < result.html.find("<ol>").unwrap(),
    "unordered list must close before the ordered list opens"
  );
}

#[test]
fn blank_line_keeps_loose_list_whole() {
  let result = parse("- a\n\n- b\n");
  assert_eq!(result.html.matches("<ul>").count(), 1);
  assert_eq!(result.html.matches("<li>").count(), 2);
}

#[test]
fn blank_line_closes_list_before_paragraph() {
  let result = parse("- a\n\nparagraph\n");

  assert_eq!(result.html.matches("<ul>").count(), 1);
  assert_html_contains(&result.html, &["<p>paragraph</p>"]);
  assert!(
    result.html.find("</ul>").unwrap() < result.html.find("<p>").unwrap()
  );
}

#[test]
fn horizontal_rule() {
  let result = parse("above\n\n***\n\nbelow\n");
  assert_html_contains(&result.html, &["<hr>"]);
}

#[test]
fn blockquote_lines_joined_with_breaks() {
  let result = parse("> first line\n> second line\n");
  assert_html_contains(&result.html, &[
    "<blockquote>first line<br>\nsecond line</blockquote>",
  ]);
}

#[test]
fn hint_block_renders_style_icon_and_paragraphs() {
  let md = "{% hint style=\"warning\" %}\nBe careful.\n\nReally.\n{% endhint %}\n";
  let result = parse(md);

  assert_html_contains(&result.html, &[
    r#"<div class="hint hint-warning">"#,
    "\u{26a0}\u{fe0f}",
    "<p>Be careful.</p>",
    "<p>Really.</p>",
  ]);
}

#[test]
fn unknown_hint_style_gets_fallback_icon() {
  let md = "{% hint style=\"mystery\" %}\nodd\n{% endhint %}\n";
  let result = parse(md);

  assert_html_contains(&result.html, &[
    r#"<div class="hint hint-mystery">"#,
    "\u{2139}\u{fe0f}",
  ]);
}

#[test]
fn raw_html_table_scaffolding_neutralized() {
  let result = parse("<table>\n<tr>\n<td>cell</td>\n</tr>\n</table>\n");

  assert!(!result.html.contains("<table>"));
  assert_html_contains(&result.html, &["<p>cell</p>"]);
}

#[test]
fn open_blocks_flushed_at_end_of_input() {
  let list = parse("- dangling");
  assert_html_contains(&list.html, &["<ul>", "<li>dangling</li>", "</ul>"]);

  let table = parse("| only | header |");
  assert_html_contains(&table.html, &["<th>only</th>", "<th>header</th>"]);

  let fence = parse("```\nunclosed\n");
  assert_html_contains(&fence.html, &["<pre><code>unclosed</code></pre>"]);
}

#[test]
fn malformed_lines_degrade_to_paragraphs() {
  let result = parse("{% hint missing-style %}\n");
  assert_html_contains(&result.html, &["<p>"]);
}

#[test]
fn plain_text_projection_in_document_order() {
  let md = "# Top\n\npara text\n\n- item one\n\n| c1 | c2 |\n\n```\ncode \
            line\n```\n";
  let result = parse(md);

  assert_eq!(
    result.plain_text,
    "Top para text item one c1 c2 code line"
  );
}

#[test]
fn frontmatter_flows_through_parse() {
  let result = parse("---\ntitle: The Title\n---\n\n# Heading\n");

  assert_eq!(result.frontmatter.get("title").map(String::as_str), Some("The Title"));
  assert_eq!(result.title(), Some("The Title"));
}

#[test]
fn title_falls_back_to_first_h1() {
  let result = parse("## minor\n\n# Major\n");
  assert_eq!(result.title(), Some("Major"));
}

#[test]
fn duplicate_heading_ids_are_preserved() {
  let result = parse("## Setup\n\ntext\n\n## Setup\n");

  assert_eq!(result.headings.len(), 2);
  assert_eq!(result.headings[0].id, result.headings[1].id);
}
