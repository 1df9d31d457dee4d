//! Navigation tree builder.
//!
//! Parses the summary document (`SUMMARY.md`) into an ordered,
//! two-level tree of groups and page references, and exposes the
//! flattened page order that drives prev/next linking. This is a
//! permissive scanner, not a strict grammar: lines matching neither
//! pattern pass through unrecognized.
use std::sync::LazyLock;

use gbook_markdown::utils::never_matching_regex;
use log::error;
use regex::Regex;
use serde::Serialize;

static GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^##\s+(.+)$").unwrap_or_else(|e| {
    error!("Failed to compile GROUP_RE regex: {e}");
    never_matching_regex()
  })
});

static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\*\s+\[([^\]]+)\]\(([^)]+)\)$").unwrap_or_else(|e| {
    error!("Failed to compile ITEM_RE regex: {e}");
    never_matching_regex()
  })
});

/// A page referenced by the summary document.
///
/// `path` is the unique key for prev/next lookup and active-state
/// comparison; two refs sharing a `path` make navigation ambiguous and
/// are not defended against.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageRef {
  pub title:     String,
  pub md_path:   String,
  pub html_path: String,
  pub path:      String,
}

impl PageRef {
  #[must_use]
  pub fn new(title: &str, md_path: &str) -> Self {
    let html_path = html_path_for(md_path);
    Self {
      title: title.to_string(),
      md_path: md_path.to_string(),
      path: format!("/{html_path}"),
      html_path,
    }
  }
}

/// One sidebar group: a level-2 heading plus the page refs under it.
/// Items that appear before any heading belong to an implicit group
/// with an empty title.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavGroup {
  pub title: String,
  pub items: Vec<PageRef>,
}

/// Derive the output path for a summary entry. `README.md` maps to
/// `index.html`; anything else swaps a trailing `.md` for `.html`.
fn html_path_for(md_path: &str) -> String {
  if md_path == "README.md" {
    return "index.html".to_string();
  }
  if let Some(dir) = md_path.strip_suffix("/README.md") {
    return format!("{dir}/index.html");
  }
  md_path.strip_suffix(".md").map_or_else(
    || md_path.to_string(),
    |stem| format!("{stem}.html"),
  )
}

/// Parse the summary document into ordered navigation groups.
#[must_use]
pub fn build_nav(summary: &str) -> Vec<NavGroup> {
  let mut groups: Vec<NavGroup> = Vec::new();

  for line in summary.lines() {
    let trimmed = line.trim();

    if let Some(caps) = GROUP_RE.captures(trimmed) {
      groups.push(NavGroup {
        title: caps[1].trim().to_string(),
        items: Vec::new(),
      });
    } else if let Some(caps) = ITEM_RE.captures(trimmed) {
      if groups.is_empty() {
        // Items before the first heading open the untitled group.
        groups.push(NavGroup {
          title: String::new(),
          items: Vec::new(),
        });
      }
      if let Some(group) = groups.last_mut() {
        group.items.push(PageRef::new(&caps[1], &caps[2]));
      }
    }
  }

  groups
}

/// Concatenate the tree group-by-group into the total page order.
/// Position in this sequence is the only thing that determines
/// prev/next neighbors; group boundaries are not treated specially.
#[must_use]
pub fn flatten(groups: &[NavGroup]) -> Vec<PageRef> {
  groups
    .iter()
    .flat_map(|group| group.items.iter().cloned())
    .collect()
}

/// Neighbors of the page with the given `path` in the flattened order.
/// Unknown paths have no neighbors.
#[must_use]
pub fn prev_next<'a>(
  pages: &'a [PageRef],
  path: &str,
) -> (Option<&'a PageRef>, Option<&'a PageRef>) {
  let Some(idx) = pages.iter().position(|page| page.path == path) else {
    return (None, None);
  };

  let prev = idx.checked_sub(1).and_then(|i| pages.get(i));
  (prev, pages.get(idx + 1))
}
