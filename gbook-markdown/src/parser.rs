//! Block parser: a line-oriented state machine over the preprocessed
//! document.
//!
//! One block mode is active at a time (code fence, hint, table, list,
//! blockquote) with one accumulator buffer per mode. The scan is a
//! single forward pass with at most one line of lookahead (needed for
//! the blank-line-inside-list rule), and every open buffer is
//! force-flushed at end of input so a document that ends mid-block
//! still renders.
use std::{fmt::Write, sync::LazyLock};

use log::error;
use regex::Regex;

use crate::{
  inline::format_inline,
  preprocess::preprocess,
  types::{Heading, ParseResult},
  utils::{collapse_whitespace, escape_html, never_matching_regex, slugify},
};

static HINT_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"^\{%\s*hint\s+style="([a-z]+)"\s*%\}$"#).unwrap_or_else(|e| {
    error!("Failed to compile HINT_OPEN_RE regex: {e}");
    never_matching_regex()
  })
});

static HINT_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\{%\s*endhint\s*%\}$").unwrap_or_else(|e| {
    error!("Failed to compile HINT_CLOSE_RE regex: {e}");
    never_matching_regex()
  })
});

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(#{1,6})\s+(.*)$").unwrap_or_else(|e| {
    error!("Failed to compile HEADING_RE regex: {e}");
    never_matching_regex()
  })
});

static HR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(\*{3,}|-{3,}|_{3,})$").unwrap_or_else(|e| {
    error!("Failed to compile HR_RE regex: {e}");
    never_matching_regex()
  })
});

static UNORDERED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\s*[-*]\s+(.*)$").unwrap_or_else(|e| {
    error!("Failed to compile UNORDERED_ITEM_RE regex: {e}");
    never_matching_regex()
  })
});

static ORDERED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\s*\d+\.\s+(.*)$").unwrap_or_else(|e| {
    error!("Failed to compile ORDERED_ITEM_RE regex: {e}");
    never_matching_regex()
  })
});

static TABLE_SEPARATOR_CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[-:\s]+$").unwrap_or_else(|e| {
    error!("Failed to compile TABLE_SEPARATOR_CELL_RE regex: {e}");
    never_matching_regex()
  })
});

// GitBook exports occasionally leave raw HTML table scaffolding in the
// Markdown. These two patterns neutralize that quirk; they are not
// general HTML passthrough.
static HTML_TABLE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^</?(?:table|thead|tbody|tr)[^>]*>$").unwrap_or_else(|e| {
    error!("Failed to compile HTML_TABLE_TAG_RE regex: {e}");
    never_matching_regex()
  })
});

static HTML_TABLE_CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^<(?:td|th)[^>]*>(.*)</(?:td|th)>$").unwrap_or_else(|e| {
    error!("Failed to compile HTML_TABLE_CELL_RE regex: {e}");
    never_matching_regex()
  })
});

/// Icon table for hint styles. Unknown styles fall back to the info
/// icon.
const HINT_ICONS: &[(&str, &str)] = &[
  ("info", "\u{2139}\u{fe0f}"),
  ("warning", "\u{26a0}\u{fe0f}"),
  ("success", "\u{2705}"),
  ("danger", "\u{1f6ab}"),
  ("tip", "\u{1f4a1}"),
];

const HINT_FALLBACK_ICON: &str = "\u{2139}\u{fe0f}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
  Unordered,
  Ordered,
}

/// Mutually-exclusive block modes. `None` is the paragraph fallback.
#[derive(Debug)]
enum BlockState {
  None,
  CodeFence { lang: String, lines: Vec<String> },
  Hint { style: String, lines: Vec<String> },
  Table { rows: Vec<String> },
  List { kind: ListKind, items: Vec<String> },
  Blockquote { lines: Vec<String> },
}

/// Parse one preprocessed-or-raw Markdown document into HTML plus its
/// structured metadata.
///
/// Never fails: any unrecognized or malformed line degrades to a
/// paragraph.
#[must_use]
pub fn parse(content: &str) -> ParseResult {
  let pre = preprocess(content);
  let lines: Vec<&str> = pre.content.lines().collect();

  let mut html = String::with_capacity(pre.content.len() * 2);
  let mut headings: Vec<Heading> = Vec::new();
  let mut plain: Vec<String> = Vec::new();
  let mut state = BlockState::None;

  let mut i = 0;
  while i < lines.len() {
    let line = lines[i];
    i += 1;
    let trimmed = line.trim();

    // While a code fence is open every other rule is bypassed.
    if let BlockState::CodeFence { lines, .. } = &mut state {
      if trimmed.starts_with("```") {
        flush(&mut state, &mut html, &mut plain);
      } else {
        lines.push(line.to_string());
      }
      continue;
    }
    if let Some(rest) = trimmed.strip_prefix("```") {
      flush(&mut state, &mut html, &mut plain);
      state = BlockState::CodeFence {
        lang:  rest.trim().to_string(),
        lines: Vec::new(),
      };
      continue;
    }

    // Hint blocks accumulate everything up to the close marker.
    if let BlockState::Hint { lines, .. } = &mut state {
      if HINT_CLOSE_RE.is_match(trimmed) {
        flush(&mut state, &mut html, &mut plain);
      } else {
        lines.push(line.to_string());
      }
      continue;
    }
    if let Some(caps) = HINT_OPEN_RE.captures(trimmed) {
      flush(&mut state, &mut html, &mut plain);
      state = BlockState::Hint {
        style: caps[1].to_string(),
        lines: Vec::new(),
      };
      continue;
    }

    // Raw HTML table scaffolding left behind by GitBook exports.
    if HTML_TABLE_TAG_RE.is_match(trimmed) {
      continue;
    }
    if let Some(caps) = HTML_TABLE_CELL_RE.captures(trimmed) {
      flush(&mut state, &mut html, &mut plain);
      emit_paragraph(&caps[1], &mut html, &mut plain);
      continue;
    }

    // Table rows: lines framed by pipes.
    if trimmed.len() > 1 && trimmed.starts_with('|') && trimmed.ends_with('|')
    {
      if let BlockState::Table { rows } = &mut state {
        rows.push(trimmed.to_string());
      } else {
        flush(&mut state, &mut html, &mut plain);
        state = BlockState::Table {
          rows: vec![trimmed.to_string()],
        };
      }
      continue;
    }
    if matches!(state, BlockState::Table { .. }) {
      flush(&mut state, &mut html, &mut plain);
    }

    if let Some(caps) = HEADING_RE.captures(trimmed) {
      flush(&mut state, &mut html, &mut plain);
      emit_heading(caps[1].len(), &caps[2], &mut html, &mut headings, &mut plain);
      continue;
    }

    if HR_RE.is_match(trimmed) {
      flush(&mut state, &mut html, &mut plain);
      html.push_str("<hr>\n");
      continue;
    }

    // Blockquotes close on the first non-`>` line, which falls through
    // to the remaining rules below.
    if let Some(rest) = trimmed.strip_prefix('>') {
      let stripped = rest.strip_prefix(' ').unwrap_or(rest).to_string();
      if let BlockState::Blockquote { lines } = &mut state {
        lines.push(stripped);
      } else {
        flush(&mut state, &mut html, &mut plain);
        state = BlockState::Blockquote {
          lines: vec![stripped],
        };
      }
      continue;
    }
    if matches!(state, BlockState::Blockquote { .. }) {
      flush(&mut state, &mut html, &mut plain);
    }

    if let Some((kind, item)) = match_list_item(trimmed) {
      match &mut state {
        BlockState::List { kind: open, items } if *open == kind => {
          items.push(item);
        },
        _ => {
          // Switching bullet style forces a flush-then-reopen even
          // mid-run.
          flush(&mut state, &mut html, &mut plain);
          state = BlockState::List {
            kind,
            items: vec![item],
          };
        },
      }
      continue;
    }

    if trimmed.is_empty() {
      // A blank line closes the current list unless the very next line
      // is itself a list item; that keeps loosely-spaced lists whole.
      if matches!(state, BlockState::List { .. }) {
        let next_is_item =
          lines.get(i).is_some_and(|l| match_list_item(l.trim()).is_some());
        if !next_is_item {
          flush(&mut state, &mut html, &mut plain);
        }
      } else {
        flush(&mut state, &mut html, &mut plain);
      }
      continue;
    }

    // Paragraph fallback.
    flush(&mut state, &mut html, &mut plain);
    emit_paragraph(trimmed, &mut html, &mut plain);
  }

  // End of input: whatever is still open gets rendered.
  flush(&mut state, &mut html, &mut plain);

  ParseResult {
    html,
    headings,
    frontmatter: pre.frontmatter,
    plain_text: collapse_whitespace(&plain.join(" ")),
  }
}

fn match_list_item(trimmed: &str) -> Option<(ListKind, String)> {
  if let Some(caps) = UNORDERED_ITEM_RE.captures(trimmed) {
    return Some((ListKind::Unordered, caps[1].to_string()));
  }
  if let Some(caps) = ORDERED_ITEM_RE.captures(trimmed) {
    return Some((ListKind::Ordered, caps[1].to_string()));
  }
  None
}

fn emit_paragraph(text: &str, html: &mut String, plain: &mut Vec<String>) {
  plain.push(text.to_string());
  let _ = writeln!(html, "<p>{}</p>", format_inline(text));
}

fn emit_heading(
  level: usize,
  raw_text: &str,
  html: &mut String,
  headings: &mut Vec<Heading>,
  plain: &mut Vec<String>,
) {
  // Bold markers are stripped before the slug and the heading record
  // so they never leak into anchors, but the emitted HTML still runs
  // the original text through the inline formatter.
  let text = raw_text.replace("**", "");
  let id = slugify(&text);
  let _ = writeln!(
    html,
    "<h{level} id=\"{id}\"><a class=\"header-anchor\" \
     href=\"#{id}\">#</a> {}</h{level}>",
    format_inline(raw_text)
  );

  plain.push(text.clone());
  headings.push(Heading {
    level: u8::try_from(level).unwrap_or(6),
    text,
    id,
  });
}

/// Render and clear whatever block is currently open.
fn flush(state: &mut BlockState, html: &mut String, plain: &mut Vec<String>) {
  match std::mem::replace(state, BlockState::None) {
    BlockState::None => {},
    BlockState::CodeFence { lang, lines } => {
      render_code_block(&lang, &lines, html, plain);
    },
    BlockState::Hint { style, lines } => render_hint(&style, &lines, html),
    BlockState::Table { rows } => render_table(&rows, html, plain),
    BlockState::List { kind, items } => render_list(kind, &items, html, plain),
    BlockState::Blockquote { lines } => render_blockquote(&lines, html),
  }
}

/// Fenced code renders escaped as a unit, with a language label and a
/// copy-to-clipboard affordance; no inline formatting applies.
fn render_code_block(
  lang: &str,
  lines: &[String],
  html: &mut String,
  plain: &mut Vec<String>,
) {
  let label = if lang.is_empty() { "text" } else { lang };
  let code = lines.join("\n");
  plain.push(code.clone());

  let _ = writeln!(
    html,
    "<div class=\"code-block\"><div class=\"code-block-header\"><span \
     class=\"code-block-lang\">{label}</span><button class=\"code-copy\" \
     type=\"button\" aria-label=\"Copy code\">Copy</button></div>\
     <pre><code>{}</code></pre></div>",
    escape_html(&code)
  );
}

/// Hint interiors go through a paragraphs-only mini parser: blank-line
/// separated runs, each inline-formatted.
fn render_hint(style: &str, lines: &[String], html: &mut String) {
  let icon = HINT_ICONS
    .iter()
    .find(|(name, _)| *name == style)
    .map_or(HINT_FALLBACK_ICON, |(_, icon)| icon);

  let mut body = String::new();
  let mut paragraph: Vec<&str> = Vec::new();
  for line in lines.iter().map(|l| l.trim()).chain(std::iter::once("")) {
    if line.is_empty() {
      if !paragraph.is_empty() {
        let _ = write!(body, "<p>{}</p>", format_inline(&paragraph.join(" ")));
        paragraph.clear();
      }
    } else {
      paragraph.push(line);
    }
  }

  let _ = writeln!(
    html,
    "<div class=\"hint hint-{style}\"><span class=\"hint-icon\">{icon}\
     </span><div class=\"hint-content\">{body}</div></div>"
  );
}

fn split_row(row: &str) -> Vec<String> {
  // Outer pipes are frame, not cell delimiters.
  let inner = &row[1..row.len() - 1];
  inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Row 0 is the header; rows whose every cell is dashes/colons are the
/// GFM alignment marker and never render as body rows.
fn render_table(rows: &[String], html: &mut String, plain: &mut Vec<String>) {
  let Some((header, body)) = rows.split_first() else {
    return;
  };

  html.push_str("<table>\n<thead>\n<tr>");
  for cell in split_row(header) {
    plain.push(cell.clone());
    let _ = write!(html, "<th>{}</th>", format_inline(&cell));
  }
  html.push_str("</tr>\n</thead>\n<tbody>\n");

  for row in body {
    let cells = split_row(row);
    let is_separator = cells
      .iter()
      .all(|cell| TABLE_SEPARATOR_CELL_RE.is_match(cell));
    if is_separator {
      continue;
    }

    html.push_str("<tr>");
    for cell in cells {
      plain.push(cell.clone());
      let _ = write!(html, "<td>{}</td>", format_inline(&cell));
    }
    html.push_str("</tr>\n");
  }

  html.push_str("</tbody>\n</table>\n");
}

fn render_list(
  kind: ListKind,
  items: &[String],
  html: &mut String,
  plain: &mut Vec<String>,
) {
  let tag = match kind {
    ListKind::Unordered => "ul",
    ListKind::Ordered => "ol",
  };

  let _ = writeln!(html, "<{tag}>");
  for item in items {
    plain.push(item.clone());
    let _ = writeln!(html, "<li>{}</li>", format_inline(item));
  }
  let _ = writeln!(html, "</{tag}>");
}

/// Accumulated quote lines are formatted independently, then joined
/// with line breaks.
fn render_blockquote(lines: &[String], html: &mut String) {
  let joined = lines
    .iter()
    .map(|line| format_inline(line))
    .collect::<Vec<_>>()
    .join("<br>\n");
  let _ = writeln!(html, "<blockquote>{joined}</blockquote>");
}
