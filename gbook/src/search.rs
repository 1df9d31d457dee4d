//! Search-index projector.
//!
//! Re-runs the parser over every page to produce a compact per-page
//! record for client-side search. This is the sole machine-readable
//! output of the core meant for direct external consumption.
use std::{fs, path::Path};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{error::BuildError, nav::PageRef};

/// Longest plain-text excerpt carried per page.
const SEARCH_TEXT_LIMIT: usize = 500;

/// One per-page search record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRecord {
  /// Page title: front-matter `title`, else first H1, else the
  /// summary entry's title.
  pub title: String,

  /// Site-absolute page path (the prev/next key).
  pub path: String,

  /// Truncated plain-text projection of the page content.
  pub text: String,

  /// Space-joined heading text, weighted separately by the client.
  pub headings: String,
}

/// Project every navigable page into a search record.
///
/// Pages whose backing file does not exist are skipped silently; each
/// page is parsed independently of the render step.
#[must_use]
pub fn build_index(pages: &[PageRef], content_root: &Path) -> Vec<SearchRecord> {
  let mut records = Vec::with_capacity(pages.len());

  for page in pages {
    let file_path = content_root.join(&page.md_path);
    let Ok(content) = fs::read_to_string(&file_path) else {
      debug!(
        "Skipping missing page in search index: {}",
        file_path.display()
      );
      continue;
    };

    let result = gbook_markdown::parse(&content);

    let title = result.title().unwrap_or(&page.title).to_string();
    let text: String = result.plain_text.chars().take(SEARCH_TEXT_LIMIT).collect();
    let headings = result
      .headings
      .iter()
      .map(|heading| heading.text.as_str())
      .collect::<Vec<_>>()
      .join(" ");

    records.push(SearchRecord {
      title,
      path: page.path.clone(),
      text,
      headings,
    });
  }

  records
}

/// Serialize the index to `search-index.json` under the output dir.
pub fn write_index(
  records: &[SearchRecord],
  output_dir: &Path,
) -> Result<(), BuildError> {
  let index_path = output_dir.join("search-index.json");
  fs::write(&index_path, serde_json::to_string(records)?)?;

  info!(
    "Search index generated: {} documents indexed",
    records.len()
  );
  Ok(())
}
